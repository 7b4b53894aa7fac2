#![warn(missing_docs)] // <= 合适时移除它.

//! 核心库. 提供 KiTS 格式 2D 肾脏 (及肿瘤) CT 切片数据集的类别均衡随机采样与加载功能.
//!
//! 磁盘布局假定由外部预处理程序生成: 每个 case 一个目录, 目录下是
//! `imaging_{idx}.npy` / `segmentation_{idx}.npy` 形式的 2D 切片文件,
//! 以及一份记录 "每个 case 中各类别切片下标" 的 `slice_indices.json`.
//! 本 crate 不负责生成这些文件, 也不校验其数组内容.
//!
//! # 注意
//!
//! 1. 每次取样都会重新读盘, 不做任何跨 epoch 缓存.
//! 2. 随机源由调用方注入. 多 worker 并行加载时, 每个 worker
//!   必须持有自己独立播种的随机数生成器.
//! 3. 在非期望情况下, 程序会直接 panic, 而不会导致内存错误. As what Rust promises.
//!
//! # 开发计划
//!
//! ### 类别均衡切片采样器 ✅
//!
//! 按配置的类别分布做加权抽类, 再在该类的切片下标列表内均匀抽样.
//!
//! 实现位于 `ct-kiwi/src/sampler.rs`.
//!
//! ### 单切片加载 ✅
//!
//! 读取一对 (imaging, segmentation) 2D `.npy` 数组并追加通道维.
//!
//! 实现位于 `ct-kiwi/src/loader/single.rs`.
//!
//! ### 伪 3D 切片窗口加载 ✅
//!
//! 以采样中心为轴, 装配奇数宽度的相邻切片堆叠; 越界邻居以全零通道填充.
//!
//! 实现位于 `ct-kiwi/src/loader/pseudo.rs`.
//!
//! ### 数据集门面 ✅
//!
//! 向训练循环暴露 `len()` / `get()` 式的可下标访问, 每次访问
//! 都是一次全新的独立随机抽样, 并串接外部变换/预处理阶段.
//!
//! 实现位于 `ct-kiwi/src/dataset`.

/// 切片下标. 目录内的切片文件编号总是非负的,
/// 但伪 3D 窗口的邻居下标可能越过 0, 故取有符号类型.
pub type SliceIdx = i64;

pub mod consts;

mod error;

pub use error::{ConfigError, FetchError};

mod catalog;

pub use catalog::{OpenCatalogError, SliceIndexCatalog};

pub mod naming;

mod sampler;

pub use sampler::{ClassBalancedSliceSampler, SliceDraw};

pub mod loader;

pub use loader::{PseudoVolumeSliceLoader, RawSlicePair, SingleSliceLoader};

pub mod dataset;

pub use dataset::{DatasetOptions, SliceDatasetOnTheFly, SliceTensors};

pub mod prelude;
