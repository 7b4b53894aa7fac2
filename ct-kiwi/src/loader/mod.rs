//! 切片加载策略.
//!
//! 两种策略共享同一套下标选取逻辑 (见 [`crate::ClassBalancedSliceSampler`]),
//! 只在磁盘物化方式上不同:
//!
//! - [`SingleSliceLoader`]: 读取一对 (imaging, segmentation) 2D 切片;
//! - [`PseudoVolumeSliceLoader`]: 以采样中心为轴读取奇数宽度的相邻
//!   imaging 切片堆叠, 搭配中心处的单张 segmentation.
//!
//! 所有加载都是同步阻塞读盘, 不做任何缓存.

use crate::consts::{IMAGING_PREFIX, SEGMENTATION_PREFIX};
use crate::error::FetchError;
use ndarray::{Array2, Array3};
use ndarray_npy::read_npy;
use std::path::{Path, PathBuf};

mod pseudo;
mod single;

pub use pseudo::PseudoVolumeSliceLoader;
pub use single::SingleSliceLoader;

/// 一次加载得到的原始数组对, 均为 channel-last 布局.
#[derive(Debug, Clone)]
pub struct RawSlicePair {
    /// 图像数组, 形状 `(h, w, c)`. 单切片时 `c == 1`,
    /// 伪 3D 时 `c` 等于窗口宽度.
    pub image: Array3<f32>,

    /// 标签数组, 形状恒为 `(h, w, 1)`.
    pub mask: Array3<u8>,
}

/// 拼出 `{root}/{case}/{prefix}_{idx_str}.npy`.
fn npy_path(root: &Path, case: &str, prefix: &str, idx_str: &str) -> PathBuf {
    let mut path = root.join(case);
    path.push(format!("{prefix}_{idx_str}.npy"));
    path
}

/// 拼出 imaging 切片文件路径.
#[inline]
fn imaging_path(root: &Path, case: &str, idx_str: &str) -> PathBuf {
    npy_path(root, case, IMAGING_PREFIX, idx_str)
}

/// 拼出 segmentation 切片文件路径.
#[inline]
fn segmentation_path(root: &Path, case: &str, idx_str: &str) -> PathBuf {
    npy_path(root, case, SEGMENTATION_PREFIX, idx_str)
}

/// 读取一张 2D imaging 切片.
fn read_imaging(path: &Path) -> Result<Array2<f32>, FetchError> {
    read_npy(path).map_err(|source| FetchError::Storage {
        path: path.to_owned(),
        source,
    })
}

/// 读取一张 2D segmentation 切片.
fn read_segmentation(path: &Path) -> Result<Array2<u8>, FetchError> {
    read_npy(path).map_err(|source| FetchError::Storage {
        path: path.to_owned(),
        source,
    })
}
