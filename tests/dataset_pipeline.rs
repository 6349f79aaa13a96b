use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tsp_dataset::evaluation::{get_costs, get_instance_costs};
use tsp_dataset::io::{read_tours, write_tours};
use tsp_dataset::{Batch, DatasetConfig, Distribution, Error, Instance, Problem, Tsp, TspDataset};

#[test]
fn sampled_set_survives_save_and_load_in_both_formats() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = TspDataset::sample(12, 40, Distribution::Uniform, 77);

    for file in ["set.tspset", "set.json"] {
        let path = dir.path().join(file);
        dataset.save(&path).unwrap();

        let loaded = TspDataset::new(&DatasetConfig::from_file(&path, dataset.len())).unwrap();
        assert_eq!(loaded.len(), dataset.len());
        for (a, b) in loaded.iter().zip(dataset.iter()) {
            for (p, q) in a.points().iter().zip(b.points()) {
                assert_eq!(p.x.to_bits(), q.x.to_bits());
                assert_eq!(p.y.to_bits(), q.y.to_bits());
            }
        }
    }
}

#[test]
fn window_length_follows_truncation_rule() {
    let dir = tempfile::tempdir().unwrap();
    let total = 25;
    let dataset = TspDataset::sample(3, total, Distribution::Uniform, 5);

    for file in ["set.tspset", "set.json"] {
        let path = dir.path().join(file);
        dataset.save(&path).unwrap();

        for offset in [0, 1, 10, 24, 25, 30] {
            for count in [0, 1, 7, 25, 100] {
                let loaded = TspDataset::new(&DatasetConfig::from_file(&path, count).with_offset(offset))
                    .unwrap();
                let expected = count.min(total.saturating_sub(offset));
                assert_eq!(loaded.len(), expected);
                if expected > 0 {
                    assert_eq!(loaded.instances(), &dataset.instances()[offset..offset + expected]);
                }
            }
        }
    }
}

#[test]
fn dataset_batches_score_like_single_instances() {
    let dataset = Tsp::make_dataset(&DatasetConfig::sampled(30, 50).with_seed(2024)).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let mut offset = 0;
    for batch in dataset.batches(16) {
        let batch: Batch = batch.unwrap();
        let tours: Vec<Vec<usize>> = (0..batch.batch_size())
            .map(|_| {
                let mut tour: Vec<usize> = (0..30).collect();
                tour.shuffle(&mut rng);
                tour
            })
            .collect();

        let (costs, aux) = get_costs(&batch, &tours).unwrap();
        assert!(aux.is_none());

        for (b, cost) in costs.iter().enumerate() {
            let instance = dataset.get(offset + b).unwrap();
            assert!((cost - instance.tour_length(&tours[b])).abs() < 1e-9);
            assert!(*cost >= 0.0);
        }
        offset += batch.batch_size();
    }
    assert_eq!(offset, dataset.len());
}

#[test]
fn tours_read_from_file_are_validated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tours.csv");
    let square = Instance::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    let instances = vec![square.clone(), square];

    write_tours(&path, &[vec![0, 1, 2, 3], vec![0, 2, 1, 3]]).unwrap();
    let tours = read_tours(&path).unwrap();
    let (costs, _) = get_instance_costs(&instances, &tours).unwrap();
    assert!((costs[0] - 4.0).abs() < 1e-12);
    assert!((costs[1] - (2.0 + 2.0 * 2f64.sqrt())).abs() < 1e-12);

    write_tours(&path, &[vec![0, 1, 2, 3], vec![0, 2, 2, 3]]).unwrap();
    let tours = read_tours(&path).unwrap();
    assert!(matches!(
        get_instance_costs(&instances, &tours),
        Err(Error::InvalidTour { position: 1, .. })
    ));
}

#[test]
fn unknown_extension_is_rejected() {
    let config = DatasetConfig::from_file("tsp20_test_seed1234.pkl", 10);
    assert!(matches!(TspDataset::new(&config), Err(Error::InvalidFormat(_))));
}
