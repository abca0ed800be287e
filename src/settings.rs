// Import necessary libraries and modules for API interaction, file I/O, and serialization.
use async_openai::{Client, config::OpenAIConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

// Define a structure to hold application settings with serialization and deserialization capabilities.
#[derive(Serialize, Deserialize, Clone)]
pub struct Settings {
    pub language: String, // Language the generator is asked to report in.
    pub openai_api_key: Option<String>, // Optional API key for OpenAI services.
    pub model: String,
    pub debug_mode: bool, // Flag to enable or disable debug logging.
}

// Implement the Default trait for Settings to provide a method to create default settings.
impl Default for Settings {
    fn default() -> Self {
        Settings {
            language: "Español".to_string(), // The facility reports in clinical Spanish.
            openai_api_key: None,            // No API key by default.
            model: "gpt-4o-mini".to_string(),
            debug_mode: false, // Debug mode disabled by default.
        }
    }
}

// Additional implementation block for Settings.
impl Settings {
    // Constructor function to create new settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Where settings and logs live: `<home>/iris/data`, falling back to
    /// the working directory when no home is resolvable.
    pub fn data_dir() -> PathBuf {
        dir::home_dir()
            .map(|home| home.join("iris").join("data"))
            .unwrap_or_else(|| PathBuf::from("./data"))
    }

    // Load settings from the default file path.
    pub fn load() -> io::Result<Self> {
        Self::load_from_file(Self::data_dir().join("settings.json"))
    }

    // Save current settings to the default file path.
    pub fn save(&self) -> io::Result<()> {
        self.save_to_file(Self::data_dir().join("settings.json"))
    }

    // Load settings from a specified file path.
    pub fn load_from_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let data = fs::read_to_string(path)?; // Read settings from file.
        let settings = serde_json::from_str(&data)?; // Deserialize JSON data into settings.
        Ok(settings)
    }

    // Save current settings to a specified file path.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let data = serde_json::to_string_pretty(self)?; // Serialize settings into pretty JSON format.
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?; // Create the directory if it doesn't exist.
        }
        fs::write(path, data)
    }

    // Asynchronously validate an API key against the OpenAI services.
    pub async fn validate_api_key(api_key: &str) -> bool {
        let client = Client::with_config(OpenAIConfig::new().with_api_key(api_key));
        client.models().list().await.is_ok()
    }
}
