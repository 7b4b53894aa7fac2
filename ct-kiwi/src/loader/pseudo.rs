//! 伪 3D 切片窗口加载.

use super::{imaging_path, read_imaging, read_segmentation, segmentation_path, RawSlicePair};
use crate::error::{ConfigError, FetchError};
use crate::naming::slice_idx_to_str;
use crate::SliceIdx;
use ndarray::{s, Array3, Axis};
use std::path::{Path, PathBuf};

/// 伪 3D 切片窗口加载器.
///
/// 以给定的中心下标为轴, 读取 `[center - half, center + half]`
/// 范围内的相邻 imaging 切片, 堆叠成 `(h, w, window)` 的多通道图像;
/// segmentation 只取中心处的一张. 相邻 mask 永远不会被读取.
///
/// 体积是有限的, 窗口贴近卷首/卷尾时部分邻居文件天然不存在:
/// 缺失的邻居静默保留为全零通道, 不报错. 中心切片本身必须存在
/// (它来自切片下标目录, 目录中登记的下标都有对应文件).
#[derive(Debug, Clone)]
pub struct PseudoVolumeSliceLoader {
    root: PathBuf,
    window: usize,
}

impl PseudoVolumeSliceLoader {
    /// 从存储根目录和窗口宽度构建加载器.
    ///
    /// `window` 必须是奇数 (`1` 表示退化为单切片行为),
    /// 否则返回 [`ConfigError::EvenWindow`].
    pub fn new<P: AsRef<Path>>(root: P, window: usize) -> Result<Self, ConfigError> {
        if window % 2 == 0 {
            return Err(ConfigError::EvenWindow(window));
        }
        Ok(Self {
            root: root.as_ref().to_owned(),
            window,
        })
    }

    /// 存储根目录.
    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 窗口宽度.
    #[inline]
    pub fn window(&self) -> usize {
        self.window
    }

    /// 窗口半宽, 即 `(window - 1) / 2`.
    #[inline]
    pub fn half_width(&self) -> usize {
        (self.window - 1) / 2
    }

    /// 加载以 `center` 为中心的切片窗口.
    ///
    /// 中心处的 imaging 与 segmentation 缺一不可, 缺失或不可读返回
    /// [`FetchError::Storage`]; 邻居 imaging 文件不存在时静默置零.
    /// 已存在但读取失败的邻居文件仍然是致命错误.
    ///
    /// # 注意
    ///
    /// 邻居切片的形状必须与中心切片一致 (同一卷的切片天然满足),
    /// 否则程序 panic.
    pub fn load(&self, case: &str, center: SliceIdx) -> Result<RawSlicePair, FetchError> {
        let center_str = slice_idx_to_str(center);

        let center_image = read_imaging(&imaging_path(&self.root, case, &center_str))?;
        let center_mask = read_segmentation(&segmentation_path(&self.root, case, &center_str))?;
        let mask = center_mask.insert_axis(Axis(2));

        if self.window == 1 {
            return Ok(RawSlicePair {
                image: center_image.insert_axis(Axis(2)),
                mask,
            });
        }

        let (h, w) = center_image.dim();
        let half = self.half_width() as SliceIdx;
        let mut image = Array3::<f32>::zeros((h, w, self.window));

        for (pos, index) in (center - half..=center + half).enumerate() {
            let path = imaging_path(&self.root, case, &slice_idx_to_str(index));
            if path.is_file() {
                let neighbor = read_imaging(&path)?;
                image.slice_mut(s![.., .., pos]).assign(&neighbor);
            }
        }

        Ok(RawSlicePair { image, mask })
    }
}
