// crates/we_physics/src/waves/mod.rs

//! 波浪模块
//!
//! - [`spectrum`]: 一维频谱密度（PM、JONSWAP）与方向分布
//! - [`dispersion`]: 线性色散关系求解
//! - [`realization`]: 由频谱离散出带随机相位的波浪分量集合

pub mod dispersion;
pub mod realization;
pub mod spectrum;

pub use dispersion::wavenumber;
pub use realization::{Realization, RealizationStats, SpectralRealizer, WaveComponent};
pub use spectrum::{spectrum_for, DirectionalSpreading, Jonswap, PiersonMoskowitz, SpectralDensity};
