use std::{
    fs::File,
    io::{self, BufReader, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::model::AiModel;

#[derive(Debug)]
pub enum Output {
    Stdout { writer: StdoutLock<'static> },
    File { writer: BufWriter<File>, path: PathBuf },
}

impl Output {
    /// Writes `value` as pretty JSON to `path`, or to stdout when `None`.
    pub fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = match path {
            Some(path) => Self::create(path)?,
            None => Self::stdout(),
        };
        output.write_json(value)
    }

    pub fn stdout() -> Self {
        Self::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn create(path: &Path) -> anyhow::Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self::File {
            writer: BufWriter::new(file),
            path: path.to_owned(),
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Self::Stdout { .. } => "stdout".to_owned(),
            Self::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(self)
            .and_then(|()| self.flush())
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout { writer } => writer.write(buf),
            Self::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout { writer } => writer.flush(),
            Self::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

pub fn read_ai_model_file<P>(path: P) -> anyhow::Result<AiModel>
where
    P: AsRef<Path>,
{
    read_json_file("AI model", path)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use skyflap_engine::Seed;
    use skyflap_strategy::DecisionModel;
    use skyflap_training::Champion;

    use super::*;

    #[test]
    fn saved_model_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let champion = Champion {
            generation: 12,
            score: 34,
            model: DecisionModel::random(&mut rand::rngs::StdRng::seed_from_u64(0)),
        };
        let model = AiModel::from_champion("test", Seed::from_u64(5), &champion);

        Output::save_json(&model, Some(path.as_path())).unwrap();
        let loaded = read_ai_model_file(&path).unwrap();
        assert_eq!(loaded, model);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["model"]["hidden_weights"]["rows"], 10);
        assert_eq!(json["model"]["hidden_weights"]["cols"], 3);
        assert_eq!(json["model"]["output_weights"]["cols"], 10);
    }

    #[test]
    fn misshaped_model_is_rejected_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        let json = serde_json::json!({
            "name": "broken",
            "trained_at": "2026-01-01T00:00:00Z",
            "generation": 0,
            "best_score": 0,
            "seed": Seed::from_u64(0),
            "model": {
                "hidden_weights": { "rows": 3, "cols": 10, "values": vec![0.0; 30] },
                "output_weights": { "rows": 1, "cols": 10, "values": vec![0.0; 10] },
            },
        });
        std::fs::write(&path, json.to_string()).unwrap();

        let err = read_ai_model_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }

    #[test]
    fn overflowing_matrix_dimensions_are_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.json");
        let huge = 1_usize << (usize::BITS / 2);
        let json = serde_json::json!({
            "name": "huge",
            "trained_at": "2026-01-01T00:00:00Z",
            "generation": 0,
            "best_score": 0,
            "seed": Seed::from_u64(0),
            "model": {
                "hidden_weights": { "rows": huge, "cols": huge, "values": [] },
                "output_weights": { "rows": 1, "cols": 10, "values": vec![0.0; 10] },
            },
        });
        std::fs::write(&path, json.to_string()).unwrap();

        let err = read_ai_model_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("huge.json"));
    }

    #[test]
    fn missing_file_names_the_kind() {
        let err = read_ai_model_file("/nonexistent/model.json").unwrap_err();
        assert!(err.to_string().contains("Failed to open AI model file"));
    }
}
