use std::path::PathBuf;

use skuval_filter::StageCount;

#[derive(Debug)]
pub struct ValidationResult {
    pub input: PathBuf,
    pub master: PathBuf,
    /// `None` on a dry run.
    pub output: Option<PathBuf>,
    pub reference_column: String,
    pub reference_count: usize,
    pub stages: Vec<StageCount>,
    pub output_rows: usize,
}

impl ValidationResult {
    pub fn input_rows(&self) -> usize {
        self.stages.first().map_or(0, |count| count.rows_in)
    }
}
