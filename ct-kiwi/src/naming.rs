//! 切片文件名中下标片段的编解码.
//!
//! 预处理程序把切片保存为 `imaging_{idx}.npy` / `segmentation_{idx}.npy`,
//! 其中 `{idx}` 是补零到 3 位的十进制串 (超过 3 位时自然增宽).
//! 本模块保证编解码精确往返: 对所有合法下标 `n`,
//! `slice_idx_from_str(&slice_idx_to_str(n)) == Some(n)`.

use crate::SliceIdx;

/// 下标片段的最小宽度.
pub const SLICE_IDX_WIDTH: usize = 3;

/// 把切片下标编码为文件名中的下标片段, 如 `7 -> "007"`, `1234 -> "1234"`.
///
/// 负下标 (只会出现在伪 3D 窗口的越界邻居上) 也能编码,
/// 得到的片段不会命中任何磁盘文件.
#[inline]
pub fn slice_idx_to_str(idx: SliceIdx) -> String {
    format!("{idx:0w$}", w = SLICE_IDX_WIDTH)
}

/// 从文件名中的下标片段解码切片下标. 片段非法时返回 `None`.
#[inline]
pub fn slice_idx_from_str(s: &str) -> Option<SliceIdx> {
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::{slice_idx_from_str, slice_idx_to_str};

    #[test]
    fn test_encoding_width() {
        assert_eq!(slice_idx_to_str(0), "000");
        assert_eq!(slice_idx_to_str(7), "007");
        assert_eq!(slice_idx_to_str(42), "042");
        assert_eq!(slice_idx_to_str(999), "999");
        assert_eq!(slice_idx_to_str(1000), "1000");
    }

    #[test]
    fn test_round_trip() {
        for n in [0, 1, 9, 10, 99, 100, 999, 1000, 4321] {
            assert_eq!(slice_idx_from_str(&slice_idx_to_str(n)), Some(n));
        }
    }

    #[test]
    fn test_decoding_invalid() {
        assert_eq!(slice_idx_from_str(""), None);
        assert_eq!(slice_idx_from_str("abc"), None);
        assert_eq!(slice_idx_from_str("0x7"), None);
    }
}
