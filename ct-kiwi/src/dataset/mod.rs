//! 数据集门面.
//!
//! 把 "采样器 + 加载器 + 外部变换流水线" 适配成训练循环期望的
//! 可下标访问模式: `len()` 给出长度, `get()` 按下标取一条样本.
//! 一个 "样本" 对应一个 case, 每次访问都触发一次全新的独立随机抽样,
//! 因此对同一下标的重复访问可能返回不同切片. 该数据集只适合
//! 容忍非幂等下标访问的采样器/训练循环.

use crate::catalog::SliceIndexCatalog;
use crate::error::{ConfigError, FetchError};
use crate::loader::{PseudoVolumeSliceLoader, RawSlicePair, SingleSliceLoader};
use crate::sampler::ClassBalancedSliceSampler;
use log::debug;
use ndarray::Array3;
use rand::Rng;
use std::path::{Path, PathBuf};

mod stage;

pub use stage::{ImageStage, MaskStage, StageFn, StagePair};

/// 默认类别采样分布 (背景 / 肾脏 / 肿瘤).
pub const DEFAULT_SAMPLING_DISTRIBUTION: [f64; 3] = [0.33, 0.33, 0.34];

/// 伪 3D 窗口的默认宽度.
pub const DEFAULT_PSEUDO_SLICES: usize = 5;

/// 一条最终样本: float 图像张量与整型标签张量.
#[derive(Debug, Clone)]
pub struct SliceTensors {
    /// 图像张量, 形状 `(h, w, c)`.
    pub image: Array3<f32>,

    /// 标签张量, 形状 `(h, w, 1)`.
    pub mask: Array3<i64>,
}

/// 数据集构建选项.
pub struct DatasetOptions {
    /// 类别采样分布. 各项之和必须精确等于 1.0.
    pub sampling_distribution: Vec<f64>,

    /// 伪 3D 窗口宽度. 只对 [`SliceDatasetOnTheFly::pseudo`] 生效.
    pub pseudo_slices: usize,

    /// 变换阶段 (如数据增广), 在预处理之前执行.
    pub transforms: Option<StageFn>,

    /// 预处理阶段 (如 z-score 标准化), 在变换之后执行.
    pub preprocessing: Option<StageFn>,
}

impl Default for DatasetOptions {
    fn default() -> Self {
        Self {
            sampling_distribution: DEFAULT_SAMPLING_DISTRIBUTION.to_vec(),
            pseudo_slices: DEFAULT_PSEUDO_SLICES,
            transforms: None,
            preprocessing: None,
        }
    }
}

/// 按配置选定的加载策略.
#[derive(Debug, Clone)]
enum LoaderKind {
    Single(SingleSliceLoader),
    Pseudo(PseudoVolumeSliceLoader),
}

/// 在线随机采样的 2D 切片数据集.
///
/// 构建后所有状态只读; 随机源由调用方在每次访问时注入,
/// 因此多 worker 并行加载时各 worker 自备生成器即可.
pub struct SliceDatasetOnTheFly {
    cases: Vec<String>,
    catalog: SliceIndexCatalog,
    sampler: ClassBalancedSliceSampler,
    loader: LoaderKind,
    transforms: Option<StageFn>,
    preprocessing: Option<StageFn>,
}

impl SliceDatasetOnTheFly {
    /// 构建单切片数据集. `opts.pseudo_slices` 被忽略.
    ///
    /// 类别集合取自 `catalog` 的第一个条目, 采样分布不合法或
    /// `catalog` 为空时返回 [`ConfigError`].
    pub fn single<P: AsRef<Path>>(
        cases: Vec<String>,
        root: P,
        catalog: SliceIndexCatalog,
        opts: DatasetOptions,
    ) -> Result<Self, ConfigError> {
        let sampler =
            ClassBalancedSliceSampler::from_catalog(&catalog, opts.sampling_distribution)?;
        debug!("single-slice dataset over {} cases", cases.len());
        Ok(Self {
            cases,
            catalog,
            sampler,
            loader: LoaderKind::Single(SingleSliceLoader::new(root)),
            transforms: opts.transforms,
            preprocessing: opts.preprocessing,
        })
    }

    /// 构建伪 3D 切片数据集, 窗口宽度取 `opts.pseudo_slices`.
    ///
    /// 除 [`Self::single`] 的失败条件外, 窗口宽度为偶数时返回
    /// [`ConfigError::EvenWindow`].
    pub fn pseudo<P: AsRef<Path>>(
        cases: Vec<String>,
        root: P,
        catalog: SliceIndexCatalog,
        opts: DatasetOptions,
    ) -> Result<Self, ConfigError> {
        let sampler =
            ClassBalancedSliceSampler::from_catalog(&catalog, opts.sampling_distribution)?;
        let loader = PseudoVolumeSliceLoader::new(root, opts.pseudo_slices)?;
        debug!(
            "pseudo-3d dataset over {} cases, window = {}",
            cases.len(),
            loader.window()
        );
        Ok(Self {
            cases,
            catalog,
            sampler,
            loader: LoaderKind::Pseudo(loader),
            transforms: opts.transforms,
            preprocessing: opts.preprocessing,
        })
    }

    /// 数据集长度, 即 case 个数 (不是切片总数).
    #[inline]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// 数据集是否为空.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// case 列表.
    #[inline]
    pub fn cases(&self) -> &[String] {
        &self.cases
    }

    /// 内部采样器.
    #[inline]
    pub fn sampler(&self) -> &ClassBalancedSliceSampler {
        &self.sampler
    }

    /// 取第 `index` 条样本.
    ///
    /// 1. 解析 case, 越界返回 [`FetchError::OutOfRange`];
    /// 2. 抽样并按配置的策略读盘;
    /// 3. 依次执行变换阶段和预处理阶段 (若配置了);
    /// 4. 把各阶段产物归一到最终张量类型: 图像 -> `f32`,
    ///    标签 -> `i64`; 已是张量形态的产物原样通过.
    pub fn get<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        index: usize,
    ) -> Result<SliceTensors, FetchError> {
        let case = self
            .cases
            .get(index)
            .ok_or(FetchError::OutOfRange(index, self.cases.len()))?;

        let raw = self.load_slices(rng, case)?;
        let mut pair = StagePair::from_raw(raw);

        if let Some(transforms) = &self.transforms {
            pair = transforms(pair);
        }
        if let Some(preprocessing) = &self.preprocessing {
            pair = preprocessing(pair);
        }

        Ok(SliceTensors {
            image: pair.image.into_tensor(),
            mask: pair.mask.into_tensor(),
        })
    }

    /// 抽一次样并读盘.
    fn load_slices<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        case: &str,
    ) -> Result<RawSlicePair, FetchError> {
        let draw = self.sampler.draw(rng, &self.catalog, case)?;
        match &self.loader {
            LoaderKind::Single(loader) => loader.load(case, draw.index),
            LoaderKind::Pseudo(loader) => loader.load(case, draw.index),
        }
    }

    /// 按 case 顺序迭代一个 epoch, 每个 case 抽取一条新样本.
    pub fn epoch<'a, R: Rng>(&'a self, rng: &'a mut R) -> Epoch<'a, R> {
        Epoch {
            dataset: self,
            rng,
            next: 0,
        }
    }
}

/// 单个 epoch 的样本迭代器.
pub struct Epoch<'a, R> {
    dataset: &'a SliceDatasetOnTheFly,
    rng: &'a mut R,
    next: usize,
}

impl<R: Rng> Iterator for Epoch<'_, R> {
    type Item = (String, Result<SliceTensors, FetchError>);

    fn next(&mut self) -> Option<Self::Item> {
        let case = self.dataset.cases.get(self.next)?.clone();
        let item = self.dataset.get(self.rng, self.next);
        self.next += 1;
        Some((case, item))
    }
}

impl<R: Rng> ExactSizeIterator for Epoch<'_, R> {
    #[inline]
    fn len(&self) -> usize {
        self.dataset.cases.len() - self.next
    }
}

/// 获取 `{用户主目录}/dataset` 目录.
pub fn home_dataset_dir() -> Option<PathBuf> {
    let mut ans = dirs::home_dir()?;
    ans.push("dataset");
    Some(ans)
}

/// 获取 `{用户主目录}/dataset` 目录下给定后继项组成的全路径.
pub fn home_dataset_dir_with<P: AsRef<Path>, I: IntoIterator<Item = P>>(it: I) -> Option<PathBuf> {
    let mut ans = dirs::home_dir()?;
    ans.push("dataset");
    ans.extend(it);
    Some(ans)
}

#[cfg(test)]
mod tests;
