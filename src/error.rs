//! # 统一错误处理模块
//!
//! 定义 braggedge 的所有错误类型，使用 `thiserror` 派生。
//!
//! 调用方（例如 Fortran 端的散射核生成器）需要按类别而不是按消息文本分支，
//! 因此每个错误都可以通过 [`BraggError::kind`] 归入一个 [`ErrorKind`]。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// braggedge 统一错误类型
#[derive(Error, Debug)]
pub enum BraggError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 配置错误
    // ─────────────────────────────────────────────────────────────
    #[error("Material not found: {name} (searched working directory, data path and inline registry)")]
    MaterialNotFound { name: String },

    #[error("Failed to parse {format} data: {origin}\nReason: {reason}")]
    ParseError {
        format: String,
        origin: String,
        reason: String,
    },

    #[error("Invalid material configuration: {0}")]
    ConfigurationError(String),

    // ─────────────────────────────────────────────────────────────
    // 物种匹配错误
    // ─────────────────────────────────────────────────────────────
    #[error("The requested element ({nuclide}) cannot be found in the material")]
    NotFoundError { nuclide: String },

    #[error("The requested element ({nuclide}) has multiple roles in the material ({count} matching components)")]
    AmbiguousMatchError { nuclide: String, count: usize },

    // ─────────────────────────────────────────────────────────────
    // 输出容量错误
    // ─────────────────────────────────────────────────────────────
    #[error("Number of Bragg edges ({planes}) is too large for output capacity {capacity} (need more than {required} slots), increase maxb")]
    CapacityError {
        planes: usize,
        capacity: usize,
        required: usize,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 材料配置字符串或材料文件有误，或材料为单晶
    Configuration,
    /// 材料中不存在请求的核素
    NotFound,
    /// 请求的核素在材料中匹配到多个组分
    AmbiguousMatch,
    /// Bragg 边数量超过输出容量
    Capacity,
    /// 文件读写错误
    Io,
    /// 命令行参数错误
    Argument,
}

impl ErrorKind {
    /// 稳定的整数编码，供外部调用方分支使用
    pub fn code(self) -> i32 {
        match self {
            ErrorKind::Configuration => 1,
            ErrorKind::NotFound => 2,
            ErrorKind::AmbiguousMatch => 3,
            ErrorKind::Capacity => 4,
            ErrorKind::Io => 5,
            ErrorKind::Argument => 6,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Configuration => write!(f, "configuration"),
            ErrorKind::NotFound => write!(f, "not-found"),
            ErrorKind::AmbiguousMatch => write!(f, "ambiguous-match"),
            ErrorKind::Capacity => write!(f, "capacity"),
            ErrorKind::Io => write!(f, "io"),
            ErrorKind::Argument => write!(f, "argument"),
        }
    }
}

impl BraggError {
    /// 获取错误类别
    pub fn kind(&self) -> ErrorKind {
        match self {
            BraggError::FileReadError { .. }
            | BraggError::FileWriteError { .. }
            | BraggError::CsvError(_) => ErrorKind::Io,
            BraggError::ParseError { .. }
            | BraggError::MaterialNotFound { .. }
            | BraggError::ConfigurationError(_) => ErrorKind::Configuration,
            BraggError::NotFoundError { .. } => ErrorKind::NotFound,
            BraggError::AmbiguousMatchError { .. } => ErrorKind::AmbiguousMatch,
            BraggError::CapacityError { .. } => ErrorKind::Capacity,
            BraggError::InvalidArgument(_) => ErrorKind::Argument,
        }
    }

    pub(crate) fn parse(
        format: impl Into<String>,
        origin: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        BraggError::ParseError {
            format: format.into(),
            origin: origin.into(),
            reason: reason.into(),
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, BraggError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_are_distinct() {
        let kinds = [
            ErrorKind::Configuration,
            ErrorKind::NotFound,
            ErrorKind::AmbiguousMatch,
            ErrorKind::Capacity,
            ErrorKind::Io,
            ErrorKind::Argument,
        ];
        let mut codes: Vec<i32> = kinds.iter().map(|k| k.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_parse_error_is_configuration() {
        let err = BraggError::parse("ncmat", "Al.ncmat", "missing @CELL");
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("missing @CELL"));
    }

    #[test]
    fn test_capacity_message() {
        let err = BraggError::CapacityError {
            planes: 10,
            capacity: 20,
            required: 20,
        };
        assert_eq!(err.kind(), ErrorKind::Capacity);
        assert!(err.to_string().contains("increase maxb"));
    }
}
