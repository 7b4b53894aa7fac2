//! 类别均衡的切片下标采样器.
//!
//! 两步独立抽样: 先按配置的类别分布做一次加权抽类,
//! 再在该 (case, 类别) 的切片下标列表内做一次均匀抽样.

use crate::catalog::SliceIndexCatalog;
use crate::error::{ConfigError, FetchError};
use crate::naming::slice_idx_to_str;
use crate::SliceIdx;
use log::info;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

/// 一次抽样的结果.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceDraw {
    /// 抽中的类别.
    pub class: String,

    /// 抽中的切片下标.
    pub index: SliceIdx,

    /// 下标的文件名片段形式 (补零十进制串).
    pub index_str: String,
}

/// 类别均衡切片采样器.
///
/// 持有类别列表与采样分布, 构建后只读. 随机源由调用方在每次
/// 抽样时注入, 因此多 worker 场景下每个 worker 只需自备一个
/// 独立播种的生成器即可安全并发抽样.
///
/// # 注意
///
/// 抽样结果刻意不可复现 (训练需要每次访问都是新样本).
/// 需要确定性时, 请注入播种过的随机源.
#[derive(Debug, Clone)]
pub struct ClassBalancedSliceSampler {
    classes: Vec<String>,
    probs: Vec<f64>,
    weights: WeightedIndex<f64>,
}

impl ClassBalancedSliceSampler {
    /// 从类别列表和采样分布构建采样器.
    ///
    /// `probs` 的长度必须等于 `classes` 的长度, 各项之和必须精确等于 1.0,
    /// 且不含负权重, 否则返回 [`ConfigError`].
    pub fn new(classes: Vec<String>, probs: Vec<f64>) -> Result<Self, ConfigError> {
        if classes.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if probs.len() != classes.len() {
            return Err(ConfigError::DistributionLen(classes.len(), probs.len()));
        }

        // 精确相等, 不带容差. 见 `ConfigError::DistributionSum` 的文档.
        let sum: f64 = probs.iter().sum();
        if sum != 1.0 {
            return Err(ConfigError::DistributionSum(sum));
        }

        let weights =
            WeightedIndex::new(probs.iter().copied()).map_err(|_| ConfigError::BadWeights)?;

        info!("sampling classes from {classes:?} with distribution {probs:?}");
        Ok(Self {
            classes,
            probs,
            weights,
        })
    }

    /// 从切片下标目录的第一个条目推导类别集合并构建采样器.
    ///
    /// 目录为空时返回 [`ConfigError::EmptyCatalog`].
    pub fn from_catalog(
        catalog: &SliceIndexCatalog,
        probs: Vec<f64>,
    ) -> Result<Self, ConfigError> {
        let classes = catalog.classes();
        if classes.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        Self::new(classes, probs)
    }

    /// 类别列表.
    #[inline]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// 采样分布.
    #[inline]
    pub fn distribution(&self) -> &[f64] {
        &self.probs
    }

    /// 为 `case` 抽取一个切片下标.
    ///
    /// 1. 按采样分布加权抽取一个类别;
    /// 2. 在该 (case, 类别) 的下标列表内均匀抽取一个下标.
    ///
    /// `case` 未登记或抽中的类别没有任何已登记下标时返回
    /// [`FetchError`]. 不回退到其它类别, 也不重试.
    pub fn draw<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        catalog: &SliceIndexCatalog,
        case: &str,
    ) -> Result<SliceDraw, FetchError> {
        let class = &self.classes[self.weights.sample(rng)];

        let by_class = catalog
            .case(case)
            .ok_or_else(|| FetchError::UnknownCase(case.to_owned()))?;
        let indices = by_class.get(class).map(Vec::as_slice).unwrap_or(&[]);
        let &index = indices
            .choose(rng)
            .ok_or_else(|| FetchError::NoSlices(case.to_owned(), class.clone()))?;

        Ok(SliceDraw {
            class: class.clone(),
            index,
            index_str: slice_idx_to_str(index),
        })
    }
}
