//! 单切片加载.

use super::{imaging_path, read_imaging, read_segmentation, segmentation_path, RawSlicePair};
use crate::error::FetchError;
use crate::naming::slice_idx_to_str;
use crate::SliceIdx;
use ndarray::Axis;
use std::path::{Path, PathBuf};

/// 单切片加载器: 每次读取一对 (imaging, segmentation) 2D 切片.
///
/// 每次调用都重新读盘, 即使刚刚加载过同一 (case, 下标) 也不例外.
#[derive(Debug, Clone)]
pub struct SingleSliceLoader {
    root: PathBuf,
}

impl SingleSliceLoader {
    /// 从存储根目录构建加载器. `root` 下应当每个 case 一个子目录.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_owned(),
        }
    }

    /// 存储根目录.
    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 加载 `case` 的第 `index` 张切片对.
    ///
    /// 两个文件缺一不可, 任何一个缺失或不可读都返回
    /// [`FetchError::Storage`], 没有部分成功的路径.
    /// 返回的两个数组都追加了单元素的通道维: `(h, w) -> (h, w, 1)`.
    pub fn load(&self, case: &str, index: SliceIdx) -> Result<RawSlicePair, FetchError> {
        let idx_str = slice_idx_to_str(index);

        let image = read_imaging(&imaging_path(&self.root, case, &idx_str))?;
        let mask = read_segmentation(&segmentation_path(&self.root, case, &idx_str))?;

        Ok(RawSlicePair {
            image: image.insert_axis(Axis(2)),
            mask: mask.insert_axis(Axis(2)),
        })
    }
}
