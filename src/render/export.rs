use std::{
    fs::File,
    io::{
        BufWriter,
        Write,
    },
    path::{
        Path,
        PathBuf,
    },
};

use chrono::{
    DateTime,
    SecondsFormat,
    Utc,
};
use tracing::info;

use crate::{
    analysis::calculate_ranks,
    core::{
        RankedResult,
        WordCloudError,
    },
};

/// Turns a finished analysis into a file on disk and returns its path.
pub trait ResultExporter {
    fn export(&self, result: &RankedResult, output_dir: &Path) -> Result<PathBuf, WordCloudError>;
}

/// `wordcloud_2024-05-01T12-30-00-123Z`, safe on every filesystem.
pub fn export_file_stem(timestamp: DateTime<Utc>) -> String {
    let iso = timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);
    format!("wordcloud_{}", iso.replace([':', '.'], "-"))
}

fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Writes the cloud population as `Rank,Word,Count,Weight`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn write_to<W: Write>(&self, result: &RankedResult, writer: &mut W) -> Result<(), WordCloudError> {
        let counts: Vec<u32> = result.cloud_population.iter().map(|w| w.count).collect();
        let ranks = calculate_ranks(&counts);

        writeln!(writer, "Rank,Word,Count,Weight")?;
        for (word, rank) in result.cloud_population.iter().zip(ranks.iter()) {
            writeln!(writer, "{},{},{},{:.3}", rank, csv_field(&word.text), word.count, word.weight)?;
        }
        Ok(())
    }
}

impl ResultExporter for CsvExporter {
    fn export(&self, result: &RankedResult, output_dir: &Path) -> Result<PathBuf, WordCloudError> {
        std::fs::create_dir_all(output_dir)?;
        let csv_path = output_dir.join(format!("{}.csv", export_file_stem(Utc::now())));

        let file = File::create(&csv_path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(result, &mut writer)?;
        writer.flush()?;

        info!("Exported {} words to {}", result.cloud_population.len(), csv_path.display());
        Ok(csv_path)
    }
}
