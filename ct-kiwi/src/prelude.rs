//! 🥝欢迎光临🥝
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::SliceIdx;

pub use crate::catalog::SliceIndexCatalog;
pub use crate::sampler::{ClassBalancedSliceSampler, SliceDraw};

pub use crate::loader::{PseudoVolumeSliceLoader, RawSlicePair, SingleSliceLoader};

pub use crate::dataset::{
    home_dataset_dir_with, DatasetOptions, ImageStage, MaskStage, SliceDatasetOnTheFly,
    SliceTensors, StageFn, StagePair, DEFAULT_PSEUDO_SLICES, DEFAULT_SAMPLING_DISTRIBUTION,
};

pub use crate::error::{ConfigError, FetchError};

pub use crate::naming::{slice_idx_from_str, slice_idx_to_str};

pub use crate::consts::gray::{KITS_BACKGROUND, KITS_KIDNEY, KITS_TUMOR};
pub use crate::consts::{kits_case_name, KITS_TESTING_SET_LEN, KITS_TRAINING_SET_LEN};

pub use crate::dataset::{self, home_dataset_dir};
