use super::{
    home_dataset_dir_with, DatasetOptions, ImageStage, MaskStage, SliceDatasetOnTheFly,
    StagePair,
};
use crate::catalog::SliceIndexCatalog;
use crate::error::{ConfigError, FetchError};
use ndarray::{Array2, Array3};
use ndarray_npy::write_npy;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// 摆出一个 case: 第 `i` 张 imaging 内容为 `100 + i`, mask 内容为 `i % 3`.
fn fake_case(root: &Path, case: &str, indices: &[i64]) {
    let case_dir = root.join(case);
    fs::create_dir_all(&case_dir).unwrap();
    for &i in indices {
        let image = Array2::<f32>::from_elem((2, 3), 100.0 + i as f32);
        let mask = Array2::<u8>::from_elem((2, 3), (i % 3) as u8);
        write_npy(case_dir.join(format!("imaging_{i:03}.npy")), &image).unwrap();
        write_npy(case_dir.join(format!("segmentation_{i:03}.npy")), &mask).unwrap();
    }
}

/// 一个 case, 下标 0..=7 全部存在, 三类分别登记 {0,1,2} / {5,6} / {7}.
fn fake_storage() -> (TempDir, SliceIndexCatalog) {
    let dir = TempDir::new().unwrap();
    fake_case(dir.path(), "case_00000", &[0, 1, 2, 3, 4, 5, 6, 7]);
    let catalog = SliceIndexCatalog::from_json_str(
        r#"{ "case_00000": { "bg": [0, 1, 2], "kidney": [5, 6], "tumor": [7] } }"#,
    )
    .unwrap();
    (dir, catalog)
}

#[test]
fn test_len_counts_cases_not_slices() {
    let (dir, catalog) = fake_storage();
    let dataset = SliceDatasetOnTheFly::single(
        vec!["case_00000".into()],
        dir.path(),
        catalog,
        DatasetOptions::default(),
    )
    .unwrap();
    assert_eq!(dataset.len(), 1);
    assert!(!dataset.is_empty());
}

#[test]
fn test_get_in_and_out_of_range() {
    let (dir, catalog) = fake_storage();
    let dataset = SliceDatasetOnTheFly::single(
        vec!["case_00000".into()],
        dir.path(),
        catalog,
        DatasetOptions::default(),
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    // len() - 1 可用, len() 越界.
    let item = dataset.get(&mut rng, dataset.len() - 1).unwrap();
    assert_eq!(item.image.dim(), (2, 3, 1));
    assert_eq!(item.mask.dim(), (2, 3, 1));

    assert!(matches!(
        dataset.get(&mut rng, dataset.len()),
        Err(FetchError::OutOfRange(1, 1))
    ));
}

#[test]
fn test_mask_becomes_long_tensor() {
    let (dir, catalog) = fake_storage();
    // 概率全压 "tumor": 每次都取下标 7, mask 内容为 7 % 3 == 1.
    let dataset = SliceDatasetOnTheFly::single(
        vec!["case_00000".into()],
        dir.path(),
        catalog,
        DatasetOptions {
            sampling_distribution: vec![0.0, 0.0, 1.0],
            ..Default::default()
        },
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(2);

    let item = dataset.get(&mut rng, 0).unwrap();
    assert_eq!(item.image, Array3::from_elem((2, 3, 1), 107.0f32));
    assert_eq!(item.mask, Array3::from_elem((2, 3, 1), 1i64));
}

#[test]
fn test_pseudo_dataset_window_shape() {
    let (dir, catalog) = fake_storage();
    let dataset = SliceDatasetOnTheFly::pseudo(
        vec!["case_00000".into()],
        dir.path(),
        catalog,
        DatasetOptions {
            sampling_distribution: vec![0.0, 1.0, 0.0],
            pseudo_slices: 3,
            ..Default::default()
        },
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    // "kidney" 的下标只有 5 和 6, 邻居 4..=7 都存在, 无零通道.
    let item = dataset.get(&mut rng, 0).unwrap();
    assert_eq!(item.image.dim(), (2, 3, 3));
    assert!(item.image.iter().all(|&v| v >= 104.0));
}

#[test]
fn test_pseudo_dataset_rejects_even_window() {
    let (dir, catalog) = fake_storage();
    let result = SliceDatasetOnTheFly::pseudo(
        vec!["case_00000".into()],
        dir.path(),
        catalog,
        DatasetOptions {
            pseudo_slices: 4,
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(ConfigError::EvenWindow(4))));
}

#[test]
fn test_stages_run_in_order() {
    let (dir, catalog) = fake_storage();
    let dataset = SliceDatasetOnTheFly::single(
        vec!["case_00000".into()],
        dir.path(),
        catalog,
        DatasetOptions {
            sampling_distribution: vec![0.0, 0.0, 1.0],
            // 变换阶段: 图像取负; 标签提前转成张量并置 9.
            transforms: Some(Box::new(|pair: StagePair| StagePair {
                image: ImageStage::Raw(pair.image.into_tensor() * -1.0),
                mask: MaskStage::Tensor(pair.mask.into_tensor() * 0 + 9),
            })),
            // 预处理阶段: 图像减 7 并标记为张量.
            preprocessing: Some(Box::new(|pair: StagePair| StagePair {
                image: ImageStage::Tensor(pair.image.into_tensor() - 7.0),
                mask: pair.mask,
            })),
            ..Default::default()
        },
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(4);

    let item = dataset.get(&mut rng, 0).unwrap();
    assert_eq!(item.image, Array3::from_elem((2, 3, 1), -114.0f32));
    assert_eq!(item.mask, Array3::from_elem((2, 3, 1), 9i64));
}

#[test]
fn test_epoch_iterates_all_cases() {
    let dir = TempDir::new().unwrap();
    fake_case(dir.path(), "case_00000", &[0, 1, 2]);
    fake_case(dir.path(), "case_00001", &[0, 1, 2]);
    let catalog = SliceIndexCatalog::from_json_str(
        r#"{
            "case_00000": { "bg": [0], "kidney": [1], "tumor": [2] },
            "case_00001": { "bg": [0], "kidney": [1], "tumor": [2] }
        }"#,
    )
    .unwrap();

    let dataset = SliceDatasetOnTheFly::single(
        vec!["case_00000".into(), "case_00001".into()],
        dir.path(),
        catalog,
        DatasetOptions::default(),
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(5);

    let epoch = dataset.epoch(&mut rng);
    assert_eq!(epoch.len(), 2);
    let items: Vec<_> = epoch.collect();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].0, "case_00000");
    assert_eq!(items[1].0, "case_00001");
    assert!(items.iter().all(|(_, r)| r.is_ok()));
}

#[test]
fn test_home_dataset_dir_with_suffix() {
    if let Some(dir) = home_dataset_dir_with(["train", "label"]) {
        assert!(dir.ends_with("dataset/train/label"));
    }
}
