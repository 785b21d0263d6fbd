//! Process-wide application state, built once at startup and handed to the shell.

use crate::activity::ActivityLog;
use crate::config::AppConfig;
use crate::convert::{Dispatcher, ExternalToolConverter};
use crate::credentials::CredentialStore;
use crate::db::Database;
use crate::error::Result;
use crate::locale::{Language, Messages};
use crate::paths;
use crate::theme::{Palette, Theme};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct AppContext {
    data_dir: PathBuf,
    config: AppConfig,
    credentials: CredentialStore,
    activity: ActivityLog,
}

impl AppContext {
    /// Load the config from `data_dir` and open the store. `db_override`
    /// replaces the configured database location.
    pub fn init(data_dir: PathBuf, db_override: Option<&Path>) -> Result<Self> {
        fs::create_dir_all(&data_dir)?;
        let config = AppConfig::load(&paths::config_path(&data_dir))?;
        let db_path = paths::database_path(&data_dir, &config.database_file, db_override);
        let db = Database::open(&db_path)?;
        info!(db = %db_path.display(), "store ready");

        Ok(Self {
            credentials: CredentialStore::new(db.clone(), config.password_scheme),
            activity: ActivityLog::new(db),
            data_dir,
            config,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn dispatcher(&self) -> Dispatcher<ExternalToolConverter> {
        Dispatcher::new(
            ExternalToolConverter::new(self.config.tools.clone()),
            self.activity.clone(),
        )
    }

    pub fn messages(&self) -> &'static Messages {
        self.config.language.messages()
    }

    pub fn palette(&self) -> &'static Palette {
        self.config.theme.palette()
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.config.theme = self.config.theme.toggled();
        self.save_config()?;
        Ok(self.config.theme)
    }

    pub fn toggle_language(&mut self) -> Result<Language> {
        self.config.language = self.config.language.toggled();
        self.save_config()?;
        Ok(self.config.language)
    }

    fn save_config(&self) -> Result<()> {
        self.config.save(&paths::config_path(&self.data_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_creates_store_and_uses_defaults() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data");
        let ctx = AppContext::init(data.clone(), None).unwrap();
        assert!(data.join("users.db").exists());
        assert_eq!(ctx.config().language, Language::Bn);
        assert_eq!(ctx.messages().login, "লগইন");
    }

    #[test]
    fn toggles_persist_across_init() {
        let dir = tempdir().unwrap();
        let data = dir.path().to_path_buf();
        {
            let mut ctx = AppContext::init(data.clone(), None).unwrap();
            assert_eq!(ctx.toggle_theme().unwrap(), Theme::Light);
            assert_eq!(ctx.toggle_language().unwrap(), Language::En);
        }
        let ctx = AppContext::init(data, None).unwrap();
        assert_eq!(ctx.config().theme, Theme::Light);
        assert_eq!(ctx.palette().bg, "#f9fafb");
        assert_eq!(ctx.messages().history, "History");
    }

    #[test]
    fn stores_share_one_database() {
        let dir = tempdir().unwrap();
        let ctx = AppContext::init(dir.path().to_path_buf(), None).unwrap();
        assert!(ctx.credentials().register("alice", "pw1").unwrap());
        ctx.activity().append("/tmp/a.pdf", "DOCX→PDF").unwrap();

        let again = AppContext::init(dir.path().to_path_buf(), None).unwrap();
        assert!(again.credentials().verify("alice", "pw1").unwrap());
        assert_eq!(again.activity().recent(8).unwrap().len(), 1);
    }

    #[test]
    fn db_override_moves_the_store() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data");
        let custom = dir.path().join("elsewhere").join("accounts.sqlite");

        let ctx = AppContext::init(data.clone(), Some(custom.as_path())).unwrap();
        assert!(ctx.credentials().register("alice", "pw1").unwrap());
        assert!(custom.exists());
        assert!(!data.join("users.db").exists());

        let default = AppContext::init(data.clone(), None).unwrap();
        assert!(!default.credentials().verify("alice", "pw1").unwrap());
        let again = AppContext::init(data, Some(custom.as_path())).unwrap();
        assert!(again.credentials().verify("alice", "pw1").unwrap());
    }
}
