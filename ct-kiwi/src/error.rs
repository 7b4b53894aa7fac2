//! 运行时错误.

use std::path::PathBuf;

/// 构建期配置错误. 一经出现即为致命错误, 程序不做任何自动修正.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// 类别采样分布之和不为 1. 参数为实际的和.
    ///
    /// 判断采用精确的浮点相等 (与生成 `slice_indices.json`
    /// 的预处理程序保持一致), 对一般分数值组合是脆弱的.
    DistributionSum(f64),

    /// 类别采样分布的长度与类别数不一致. 参数为 (类别数, 实际长度).
    DistributionLen(usize, usize),

    /// 类别采样分布含有非法权重 (如负数).
    BadWeights,

    /// 伪 3D 切片窗口宽度不是奇数. 参数为实际宽度.
    EvenWindow(usize),

    /// 切片下标目录为空, 无法推导类别集合.
    EmptyCatalog,
}

/// 单次取样的运行时错误. 对该次访问是致命的: 不重试, 不回退到其它类别.
#[derive(Debug)]
pub enum FetchError {
    /// case 不在切片下标目录中.
    UnknownCase(String),

    /// 该 (case, 类别) 下没有任何已登记的切片下标.
    ///
    /// 第一个参数是 case, 第二个参数是抽中的类别.
    NoSlices(String, String),

    /// 必需的切片文件缺失或不可读.
    Storage {
        /// 出错的文件路径.
        path: PathBuf,

        /// 底层 npy 读取错误.
        source: ndarray_npy::ReadNpyError,
    },

    /// 数据集访问下标越界.
    ///
    /// 第一个参数是请求的下标, 第二个参数是数据集长度.
    OutOfRange(usize, usize),
}
