//! CSV output format for compression records
//!
//! `--format csv` dumps the parsed records for spreadsheet analysis. Totals
//! columns are left empty for records the log reported no file totals for.

use crate::record::CompressionRecord;

/// CSV record exporter
#[derive(Debug)]
pub struct CsvExport<'a> {
    records: &'a [CompressionRecord],
}

impl<'a> CsvExport<'a> {
    pub fn new(records: &'a [CompressionRecord]) -> Self {
        Self { records }
    }

    /// Generate CSV output as a string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str(
            "file,category,original_tokens,compressed_tokens,savings_percent,ratio,\
             total_original,total_compressed,total_savings\n",
        );

        for record in self.records {
            output.push_str(&format!(
                "{},{},{},{},{},{:.4}",
                record.file_index,
                record.category,
                record.original_tokens,
                record.compressed_tokens,
                record.savings_percent,
                record.ratio
            ));
            match record.totals {
                Some(totals) => {
                    output.push_str(&format!(
                        ",{},{},{}",
                        totals.original, totals.compressed, totals.savings_percent
                    ));
                }
                None => output.push_str(",,,"),
            }
            output.push('\n');
        }

        output
    }
}
