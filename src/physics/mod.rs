//! # 物理计算模块
//!
//! 提供中子物理常数、原子数据库、热位移和衍射晶面生成。
//!
//! ## 子模块
//! - `constants`: 物理常数与能量/波长换算
//! - `atomdb`: 中子散射原子数据库
//! - `msd`: 均方位移（Debye / VDOS）
//! - `hkl`: 衍射晶面生成
//!
//! ## 依赖关系
//! - 被 `parsers/ncmat.rs` 和 `bragg/` 使用
//! - 使用 `models/`

pub mod atomdb;
pub mod constants;
pub mod hkl;
pub mod msd;

pub use constants::{ekin2wl, wl2ekin};
pub use hkl::PlaneGenerator;
