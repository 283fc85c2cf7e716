//! JSONL (JSON Lines) storage.
//!
//! Each line is a valid JSON object representing one entity. Corrupt lines
//! are skipped with a warning rather than failing the whole read, so one
//! bad record never takes down a query over a full season.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::models::{Match, Team};

use super::{StorageConfig, StorageError};

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Append a single entity to the file.
    pub fn append(&self, entity: &T) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        let json = serde_json::to_string(entity)?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        debug!("Appended entity to {:?}", self.path);
        Ok(())
    }

    /// Append multiple entities to the file.
    pub fn append_batch(&self, entities: &[T]) -> Result<usize, StorageError> {
        if entities.is_empty() {
            return Ok(0);
        }

        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        info!("Appended {} entities to {:?}", count, self.path);

        Ok(count)
    }

    /// Write entities, replacing the entire file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        info!("Wrote {} entities to {:?}", count, self.path);

        Ok(count)
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Check if the file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read all entities from the file. A missing file reads as empty.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();
        let mut line_num = 0;

        for line in reader.lines() {
            line_num += 1;
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!(
                        "Failed to parse line {} in {:?}: {}",
                        line_num, self.path, e
                    );
                }
            }
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }

    /// Read entities matching a predicate.
    pub fn read_where<F>(&self, predicate: F) -> Result<Vec<T>, StorageError>
    where
        F: Fn(&T) -> bool,
    {
        let all = self.read_all()?;
        Ok(all.into_iter().filter(predicate).collect())
    }
}

/// Reader for the global team file.
pub fn team_reader(config: &StorageConfig) -> JsonlReader<Team> {
    JsonlReader::new(config.teams_path())
}

/// Writer for the global team file.
pub fn team_writer(config: &StorageConfig) -> JsonlWriter<Team> {
    JsonlWriter::new(config.teams_path())
}

/// Reader for one team's match file.
pub fn match_reader(config: &StorageConfig, team_id: &str) -> JsonlReader<Match> {
    JsonlReader::new(config.match_path(team_id))
}

/// Writer for one team's match file.
pub fn match_writer(config: &StorageConfig, team_id: &str) -> JsonlWriter<Match> {
    JsonlWriter::new(config.match_path(team_id))
}

/// Team ids that have a match file, via glob over the matches directory.
pub fn list_match_files(config: &StorageConfig) -> Result<Vec<String>, StorageError> {
    let dir = config.matches_dir();
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let pattern = dir.join("*.jsonl");
    let pattern = pattern
        .to_str()
        .ok_or_else(|| StorageError::InvalidPath(format!("{:?}", dir)))?;

    let mut team_ids = Vec::new();
    for entry in glob::glob(pattern).map_err(|e| StorageError::InvalidPath(e.to_string()))? {
        match entry {
            Ok(path) => {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    team_ids.push(stem.to_string());
                }
            }
            Err(e) => warn!("Skipping unreadable match file: {}", e),
        }
    }

    team_ids.sort();
    Ok(team_ids)
}

/// Number of stored matches per team.
pub fn match_counts(
    config: &StorageConfig,
) -> Result<std::collections::HashMap<crate::models::TeamId, u32>, StorageError> {
    let mut counts = std::collections::HashMap::new();
    for team_id in list_match_files(config)? {
        let matches = match_reader(config, &team_id).read_all()?;
        counts.insert(crate::models::TeamId::from(team_id), matches.len() as u32);
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeamId;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn temp_config() -> (TempDir, StorageConfig) {
        let dir = TempDir::new().unwrap();
        let config = StorageConfig::new(dir.path().to_path_buf());
        (dir, config)
    }

    fn sample_match(opponent: &str) -> Match {
        Match::new(
            TeamId::from("team-1"),
            "KV Blauw-Wit".to_string(),
            opponent.to_string(),
            "2024-03-16".to_string(),
            18,
            15,
        )
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let (_dir, config) = temp_config();
        let matches = match_reader(&config, "team-1").read_all().unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_append_and_read_round_trip() {
        let (_dir, config) = temp_config();
        let writer = match_writer(&config, "team-1");
        writer.append(&sample_match("KV Meerkerk")).unwrap();
        writer.append(&sample_match("KV Ajax")).unwrap();

        let matches = match_reader(&config, "team-1").read_all().unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].opponent, "KV Meerkerk");
        assert_eq!(matches[1].opponent, "KV Ajax");
    }

    #[test]
    fn test_append_batch_and_write_all() {
        let (_dir, config) = temp_config();
        let writer = match_writer(&config, "team-1");
        let batch = vec![sample_match("A"), sample_match("B")];
        assert_eq!(writer.append_batch(&batch).unwrap(), 2);

        assert_eq!(writer.write_all(&[sample_match("C")]).unwrap(), 1);
        let matches = match_reader(&config, "team-1").read_all().unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].opponent, "C");
    }

    #[test]
    fn test_corrupt_lines_skipped() {
        let (_dir, config) = temp_config();
        let writer = match_writer(&config, "team-1");
        writer.append(&sample_match("A")).unwrap();

        use std::io::Write as _;
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(config.match_path("team-1"))
            .unwrap();
        writeln!(file, "{{not json").unwrap();
        writeln!(file).unwrap();

        let writer = match_writer(&config, "team-1");
        writer.append(&sample_match("B")).unwrap();

        let matches = match_reader(&config, "team-1").read_all().unwrap();
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_read_where() {
        let (_dir, config) = temp_config();
        let writer = match_writer(&config, "team-1");
        let mut unfinished = sample_match("B");
        unfinished.finished = false;
        writer
            .append_batch(&[sample_match("A"), unfinished])
            .unwrap();

        let finished = match_reader(&config, "team-1")
            .read_where(|m: &Match| m.finished)
            .unwrap();
        assert_eq!(finished.len(), 1);
    }

    #[test]
    fn test_list_match_files_and_counts() {
        let (_dir, config) = temp_config();
        match_writer(&config, "team-b").append(&sample_match("A")).unwrap();
        match_writer(&config, "team-a").append(&sample_match("A")).unwrap();
        match_writer(&config, "team-a").append(&sample_match("B")).unwrap();

        let ids = list_match_files(&config).unwrap();
        assert_eq!(ids, vec!["team-a", "team-b"]);

        let counts = match_counts(&config).unwrap();
        assert_eq!(counts.get(&TeamId::from("team-a")), Some(&2));
        assert_eq!(counts.get(&TeamId::from("team-b")), Some(&1));
    }

    #[test]
    fn test_team_round_trip() {
        let (_dir, config) = temp_config();
        let team = Team::new(
            "KV Blauw-Wit".to_string(),
            Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap(),
        );
        team_writer(&config).append(&team).unwrap();

        let teams = team_reader(&config).read_all().unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].id, team.id);
    }
}
