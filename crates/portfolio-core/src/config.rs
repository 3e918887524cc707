use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

use crate::ai::CompletionSettings;
use crate::widget::Persona;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_RELAY_ADDR: &str = "127.0.0.1:8787";
pub const RELAY_COMPLETIONS_PATH: &str = "/api/chat/completions";
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_EMPLOYEES_URL: &str = "http://localhost:3001/employees";

pub const DEFAULT_PERSONA: &str = "Você é um assistente virtual especializado no currículo de Gustavo Reis Souza Lima, um desenvolvedor Full Stack e estudante de Sistemas de Informação na UFLA. Sua tarefa é responder de forma clara e objetiva sobre as experiências, habilidades e competências de Gustavo. Ele tem experiência com desenvolvimento de aplicações web, utilizando Node.js no back-end, e Angular/React no front-end, além de conhecimentos em Tailwind CSS, ShadCN/UI, Docker, Prisma, Postgres e AWS. Ele trabalha com metodologias ágeis como Scrum e Kanban, aplica boas práticas como SOLID e Clean Code, e tem experiência em documentação de APIs com Swagger, CI/CD e versionamento de código com Git. Também possui inglês intermediário (B1) e é proativo e comunicativo.";

pub const DEFAULT_GREETING: &str = "Olá! Sou sua assistente virtual, especializada no currículo de Gustavo Reis Souza Lima. Estou aqui para fornecer respostas claras e objetivas sobre as habilidades e experiências de Gustavo, incluindo seu trabalho com Node.js, React, Angular, AWS, Docker, Prisma e muito mais. Se precisar de informações sobre seu perfil ou tiver dúvidas sobre suas competências, estou à disposição para ajudar!";

/// Settings shared by the terminal front end and the relay.
///
/// Every field is optional on disk; accessors supply the defaults.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub persona: Option<String>,
    pub greeting: Option<String>,
    /// Where the widget sends completion requests (normally the relay)
    pub completion_url: Option<String>,
    /// Only the relay should have this
    pub openai_api_key: Option<String>,
    pub upstream_url: Option<String>,
    pub relay_addr: Option<String>,
    pub employees_url: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the user config directory, or defaults when no file exists.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| anyhow!("Invalid config file {}: {}", path.display(), e))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    /// Apply environment overrides on top of the file values.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("OPENAI_API_KEY") {
            self.openai_api_key = Some(key);
        }
        if let Some(url) = non_empty("PORTFOLIO_COMPLETION_URL") {
            self.completion_url = Some(url);
        }
        if let Some(addr) = non_empty("PORTFOLIO_RELAY_ADDR") {
            self.relay_addr = Some(addr);
        }
        if let Some(url) = non_empty("PORTFOLIO_EMPLOYEES_URL") {
            self.employees_url = Some(url);
        }
        self
    }

    pub fn completion_settings(&self) -> CompletionSettings {
        CompletionSettings {
            model: self.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        }
    }

    pub fn persona(&self) -> Persona {
        Persona {
            instructions: self.persona.clone().unwrap_or_else(|| DEFAULT_PERSONA.to_string()),
            greeting: self.greeting.clone().unwrap_or_else(|| DEFAULT_GREETING.to_string()),
        }
    }

    pub fn relay_addr(&self) -> &str {
        self.relay_addr.as_deref().unwrap_or(DEFAULT_RELAY_ADDR)
    }

    pub fn completion_url(&self) -> String {
        match &self.completion_url {
            Some(url) => url.clone(),
            None => format!("http://{}{}", self.relay_addr(), RELAY_COMPLETIONS_PATH),
        }
    }

    pub fn upstream_url(&self) -> &str {
        self.upstream_url.as_deref().unwrap_or(DEFAULT_UPSTREAM_URL)
    }

    pub fn employees_url(&self) -> &str {
        self.employees_url.as_deref().unwrap_or(DEFAULT_EMPLOYEES_URL)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("portfolio").join("config.json"))
    }
}
