//! 通用常量.

/// 单通道颜色.
pub mod gray {
    /// 原 KiTS 数据集中, 背景的像素值.
    pub const KITS_BACKGROUND: u8 = 0;

    /// 原 KiTS 数据集中, 肾脏的像素值.
    pub const KITS_KIDNEY: u8 = 1;

    /// 原 KiTS 数据集中, 肿瘤的像素值.
    pub const KITS_TUMOR: u8 = 2;

    /// 像素是否是肿瘤?
    #[inline]
    pub const fn is_tumor(p: u8) -> bool {
        matches!(p, KITS_TUMOR)
    }

    /// 像素是否是肾脏?
    #[inline]
    pub const fn is_kidney(p: u8) -> bool {
        matches!(p, KITS_KIDNEY)
    }

    /// 像素是否是背景?
    #[inline]
    pub const fn is_background(p: u8) -> bool {
        matches!(p, KITS_BACKGROUND)
    }

    /// 像素是否是肾脏或肿瘤?
    #[inline]
    pub const fn is_kidney_or_tumor(p: u8) -> bool {
        matches!(p, KITS_KIDNEY | KITS_TUMOR)
    }
}

/// KiTS 训练集大小 (带标签的 case 数).
pub const KITS_TRAINING_SET_LEN: u32 = 210;

/// KiTS 测试集大小.
pub const KITS_TESTING_SET_LEN: u32 = 90;

/// 切片图像文件名前缀.
pub const IMAGING_PREFIX: &str = "imaging";

/// 切片标签文件名前缀.
pub const SEGMENTATION_PREFIX: &str = "segmentation";

/// 预处理输出的切片下标目录文件名.
pub const SLICE_INDICES_JSON: &str = "slice_indices.json";

/// 从 case 编号获得 KiTS 风格的 case 目录名, 如 `case_00042`.
#[inline]
pub fn kits_case_name(num: u32) -> String {
    format!("case_{num:05}")
}
