//! # 解析器模块
//!
//! 提供材料配置字符串与 NCMAT 材料文件的解析，以及基于 NCMAT 的材料提供者。
//!
//! ## 依赖关系
//! - 被 `bragg/loader.rs`、`lib.rs` 和 `commands/` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: matcfg, ncmat

pub mod matcfg;
pub mod ncmat;

pub use matcfg::MatCfg;

use crate::bragg::MaterialProvider;
use crate::error::{BraggError, Result};
use crate::models::MaterialModel;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// NCMAT 材料提供者
///
/// 文件名依次在工作目录、搜索目录和内存注册表中查找。
#[derive(Debug, Clone, Default)]
pub struct NcmatProvider {
    search_path: Vec<PathBuf>,
    inline: HashMap<String, String>,
}

impl NcmatProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加搜索目录
    pub fn with_search_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_path.push(dir.into());
        self
    }

    /// 注册内存中的材料文本
    pub fn with_inline(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.inline.insert(name.into(), content.into());
        self
    }

    /// 查找材料文件的实际路径
    pub fn locate(&self, filename: &str) -> Option<PathBuf> {
        let direct = Path::new(filename);
        if direct.is_file() {
            return Some(direct.to_path_buf());
        }
        if direct.is_absolute() {
            return None;
        }
        self.search_path
            .iter()
            .map(|dir| dir.join(filename))
            .find(|p| p.is_file())
    }

    fn load(&self, filename: &str) -> Result<ncmat::NcmatData> {
        if let Some(path) = self.locate(filename) {
            return ncmat::parse_ncmat_file(&path);
        }
        if let Some(content) = self.inline.get(filename) {
            return ncmat::parse_ncmat_content(content, filename);
        }
        Err(BraggError::MaterialNotFound {
            name: filename.to_string(),
        })
    }
}

impl MaterialProvider for NcmatProvider {
    fn build(&self, cfg: &MatCfg) -> Result<MaterialModel> {
        let data = self.load(cfg.filename())?;
        ncmat::build_material(&data, cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const IRON: &str = "NCMAT v4\n@CELL\n lengths 2.8665 2.8665 2.8665\n angles 90 90 90\n@ATOMPOSITIONS\n Fe 0 0 0\n Fe 1/2 1/2 1/2\n@DEBYETEMPERATURE\n Fe 477\n";

    #[test]
    fn test_inline_registry() {
        let provider = NcmatProvider::new().with_inline("Fe.ncmat", IRON);
        let cfg = MatCfg::parse("Fe.ncmat;temp=300").unwrap();
        let model = provider.build(&cfg).unwrap();
        assert_eq!(model.structure().n_atoms, 2);
        assert_eq!(model.temperature(), 300.0);
        // 体心立方：(110) 为首个晶面
        assert_eq!(model.planes()[0].hkl, Some([1, 1, 0]));
        assert_eq!(model.planes()[0].multiplicity, 12);
    }

    #[test]
    fn test_search_path() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("iron_bcc.ncmat"), IRON).unwrap();

        let provider = NcmatProvider::new().with_search_path(dir.path());
        assert!(provider.locate("iron_bcc.ncmat").is_some());

        let cfg = MatCfg::parse("iron_bcc.ncmat").unwrap();
        let model = provider.build(&cfg).unwrap();
        assert_eq!(model.name(), "iron_bcc.ncmat");
    }

    #[test]
    fn test_missing_file() {
        let provider = NcmatProvider::new();
        let cfg = MatCfg::parse("does_not_exist.ncmat").unwrap();
        let err = provider.build(&cfg).unwrap_err();
        assert!(matches!(err, BraggError::MaterialNotFound { .. }));
        assert_eq!(err.kind(), crate::error::ErrorKind::Configuration);
    }

    #[test]
    fn test_tiny_dcutoff_is_configuration_error() {
        let provider = NcmatProvider::new().with_inline("Fe.ncmat", IRON);
        let err = crate::bragg::extract_bragg_edges(
            &provider,
            "Fe.ncmat;dcutoff=1e-6",
            293.6,
            26,
            0,
            100_000,
        )
        .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Configuration);
    }
}
