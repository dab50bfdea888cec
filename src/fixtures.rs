#[cfg(test)]
pub mod test {
    use std::fs;
    use std::path::{Path, PathBuf};

    use toml::Table;

    /// Parse TOML text into a raw table.
    pub fn table(toml_str: &str) -> Table {
        toml_str.parse::<Table>().unwrap()
    }

    /// A `[db]` section pointing at `db_path`, properly quoted for TOML.
    pub fn db_line(db_path: &Path) -> String {
        let quoted = toml::Value::String(db_path.display().to_string());
        format!("[db]\ndb_file = {quoted}\n")
    }

    /// Write `content` to `config.toml` in `dir` and return its path.
    pub fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("config.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn db_line_parses_back() {
        let raw = table(&db_line(Path::new("/tmp/with space/nav.db")));
        assert_eq!(raw["db"]["db_file"].as_str(), Some("/tmp/with space/nav.db"));
    }
}
