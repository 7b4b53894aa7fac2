//! 切片下标目录.
//!
//! 由外部预处理程序生成 (`slice_indices.json`), 记录每个 case
//! 中各类别切片的下标列表. 本 crate 只读取它, 从不修改.

use crate::SliceIdx;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// 打开切片下标目录错误.
#[derive(Debug)]
pub enum OpenCatalogError {
    /// 底层 I/O 错误.
    Io(std::io::Error),

    /// JSON 反序列化错误.
    Json(serde_json::Error),
}

/// 切片下标目录: case -> 类别 -> 切片下标列表.
///
/// 两级映射都按键的字典序排列, 因此类别顺序 (进而采样分布各项的
/// 对应关系) 与 JSON 对象内的书写顺序无关, 是确定的.
///
/// # 注意
///
/// 1. 目录在构建后只读. 多线程并发读取是安全的.
/// 2. 除取样时的非空检查外, 不对内容做进一步校验.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct SliceIndexCatalog {
    map: BTreeMap<String, BTreeMap<String, Vec<SliceIdx>>>,
}

impl SliceIndexCatalog {
    /// 从已有的两级映射构建目录.
    #[inline]
    pub fn from_map(map: BTreeMap<String, BTreeMap<String, Vec<SliceIdx>>>) -> Self {
        Self { map }
    }

    /// 从 `slice_indices.json` 文件加载目录.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, OpenCatalogError> {
        let file = File::open(path.as_ref()).map_err(OpenCatalogError::Io)?;
        serde_json::from_reader(BufReader::new(file)).map_err(OpenCatalogError::Json)
    }

    /// 从预处理输出目录加载 `slice_indices.json`.
    ///
    /// 等价于 `from_json_file(root.join("slice_indices.json"))`.
    pub fn from_preprocessed_dir<P: AsRef<Path>>(root: P) -> Result<Self, OpenCatalogError> {
        Self::from_json_file(root.as_ref().join(crate::consts::SLICE_INDICES_JSON))
    }

    /// 从 JSON 字符串加载目录.
    pub fn from_json_str(s: &str) -> Result<Self, OpenCatalogError> {
        serde_json::from_str(s).map_err(OpenCatalogError::Json)
    }

    /// 目录中的 case 个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// 目录是否为空.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// case 是否已登记.
    #[inline]
    pub fn contains_case(&self, case: &str) -> bool {
        self.map.contains_key(case)
    }

    /// 按字典序迭代所有 case 名.
    pub fn cases(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// 从目录的第一个 case 条目推导类别集合 (按字典序).
    ///
    /// 目录为空时返回空列表.
    ///
    /// # 注意
    ///
    /// 这里假定目录内所有 case 拥有相同的类别集合, 并且不做跨
    /// case 校验 (与生成该目录的预处理程序保持一致的约定).
    pub fn classes(&self) -> Vec<String> {
        self.map
            .values()
            .next()
            .map(|by_class| by_class.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// 获取某 case 下某类别已登记的切片下标列表.
    ///
    /// case 未登记或该类别缺失时返回 `None`. 需要区分这两种情况时,
    /// 请先用 [`Self::case`] 查询.
    #[inline]
    pub fn indices(&self, case: &str, class: &str) -> Option<&[SliceIdx]> {
        self.map.get(case)?.get(class).map(Vec::as_slice)
    }

    /// 获取某 case 的类别 -> 下标列表映射.
    #[inline]
    pub fn case(&self, case: &str) -> Option<&BTreeMap<String, Vec<SliceIdx>>> {
        self.map.get(case)
    }
}
