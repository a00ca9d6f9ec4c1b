//! ninepatch-test - Regression test framework
//!
//! Supports three modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison (visual inspection)
//!
//! # Usage
//!
//! ```ignore
//! use ninepatch_test::RegParams;
//!
//! let mut rp = RegParams::new("encode");
//! rp.compare_values(12.0, out.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use std::fs;
use std::path::PathBuf;

/// Load an image written by a test
pub fn load_image(path: impl AsRef<std::path::Path>) -> TestResult<ninepatch_core::Raster> {
    let path = path.as_ref();
    ninepatch_io::read_image(path).map_err(|e| TestError::ImageLoad {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // ninepatch-test is at crates/ninepatch-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Create an empty scratch directory `regout/<name>` for a test.
///
/// Any content left over from a previous run is removed first.
pub fn scratch_dir(name: &str) -> TestResult<PathBuf> {
    let dir = PathBuf::from(regout_dir()).join(name);
    if dir.exists() {
        fs::remove_dir_all(&dir)?;
    }
    fs::create_dir_all(&dir).map_err(|e| TestError::DirectoryCreate {
        path: dir.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
