use anyhow::Result;
use hex_image_diff::{DiffReport, DiffVerdict};
use std::io::Write;

/// Write the diff listing: the literal `IDENTICAL` line, the differing
/// blocks, or the suppressed-only section with its closing decision line.
pub fn write_text_report<W: Write>(w: &mut W, report: &DiffReport) -> Result<()> {
    match report.verdict() {
        DiffVerdict::Identical => {
            writeln!(w, "IDENTICAL")?;
        }
        DiffVerdict::SuppressedOnly => {
            writeln!(w, "SUPPRESSED_DIFF_LINES:")?;
            for block in &report.blocks {
                writeln!(w, "{}", block.render(report.block_width))?;
            }
            writeln!(
                w,
                "SUPPRESSED_ERASED: differences detected but all are FF<->00 only (suppressed_bytes={}). Treating as IDENTICAL.",
                report.suppressed_bytes
            )?;
        }
        DiffVerdict::Different => {
            // Blocks whose only differences are suppressed stay hidden.
            for block in report.blocks.iter().filter(|b| b.has_reported()) {
                writeln!(w, "{}", block.render(report.block_width))?;
            }
        }
    }
    Ok(())
}
