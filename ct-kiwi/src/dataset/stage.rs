//! 变换流水线的阶段产物.
//!
//! 外部变换/预处理阶段接收 channel-last 的 (image, mask) 对,
//! 返回同样结构的一对产物. 产物带类型标签: 要么仍是原始数组
//! (`Raw`), 要么已经完成了数值转换 (`Tensor`). 门面在流水线末尾
//! 统一归一: `Raw` 被转换, `Tensor` 原样通过.

use crate::loader::RawSlicePair;
use ndarray::Array3;

/// 图像在流水线中的形态.
///
/// 图像的原始数组与张量同为 `f32`, 标签只区分 "是否还需要转换".
#[derive(Debug, Clone)]
pub enum ImageStage {
    /// 未转换的原始数组.
    Raw(Array3<f32>),

    /// 已完成转换的张量.
    Tensor(Array3<f32>),
}

impl ImageStage {
    /// 归一为最终的 float 张量.
    #[inline]
    pub fn into_tensor(self) -> Array3<f32> {
        match self {
            Self::Raw(a) | Self::Tensor(a) => a,
        }
    }
}

/// 标签在流水线中的形态.
#[derive(Debug, Clone)]
pub enum MaskStage {
    /// 未转换的原始数组.
    Raw(Array3<u8>),

    /// 已完成转换的整型标签张量.
    Tensor(Array3<i64>),
}

impl MaskStage {
    /// 归一为最终的整型标签张量.
    #[inline]
    pub fn into_tensor(self) -> Array3<i64> {
        match self {
            Self::Raw(a) => a.mapv(i64::from),
            Self::Tensor(t) => t,
        }
    }
}

/// 一个阶段的输入/输出对, channel-last 布局.
#[derive(Debug, Clone)]
pub struct StagePair {
    /// 图像.
    pub image: ImageStage,

    /// 标签.
    pub mask: MaskStage,
}

impl StagePair {
    /// 从刚读盘的原始数组对构造流水线入口.
    #[inline]
    pub fn from_raw(raw: RawSlicePair) -> Self {
        Self {
            image: ImageStage::Raw(raw.image),
            mask: MaskStage::Raw(raw.mask),
        }
    }
}

/// 变换/预处理阶段. 本 crate 不检查也不约束其内部逻辑.
pub type StageFn = Box<dyn Fn(StagePair) -> StagePair + Send + Sync>;
