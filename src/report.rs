use std::path::Path;

use crate::error::{CheckError, Result};

/// Render a score with exactly two decimal digits
///
/// # Arguments
/// * `similarity` - score in [0, 1]
///
/// # Returns
/// * `Result<String>` - e.g. `"0.86"`; `InvalidInputType` for NaN or a
///   value outside [0, 1]
pub fn format_similarity(similarity: f64) -> Result<String> {
    if !(0.0..=1.0).contains(&similarity) {
        return Err(CheckError::InvalidInputType(format!(
            "similarity must be a number in [0, 1], got {similarity}"
        )));
    }
    Ok(format!("{similarity:.2}"))
}

/// Write the formatted score to a file, replacing its contents
pub fn write_result(path: impl AsRef<Path>, similarity: f64) -> Result<()> {
    let formatted = format_similarity(similarity)?;
    std::fs::write(path, formatted).map_err(CheckError::computation)
}

/// Plain text summary naming both documents and the score
pub fn generate_report(original: &str, suspect: &str, similarity: f64) -> Result<String> {
    let formatted = format_similarity(similarity)?;
    Ok(format!(
        "查重报告\n原文文件: {original}\n抄袭版文件: {suspect}\n相似度: {formatted}\n"
    ))
}
