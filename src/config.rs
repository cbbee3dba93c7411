use std::path::{Path, PathBuf};
use colored::Colorize;
use json_comments::StripComments;
use serde::{Serialize, Deserialize};

pub const DEFAULT_API_ADDR: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

const SYSTEM_INSTRUCTION: &str = "Você é um assistente virtual inteligente do escritório Alan Wesdra Advocacia e Consultoria Jurídica.
Seu objetivo é fornecer informações básicas sobre serviços jurídicos, áreas de atuação e agendamento.
Informações do Escritório:
- Titular: Alan Wesdra
- Endereço: Av. João Paulo I, 764 - Nobre, Brumado - BA, 46100-000
- Telefone: (77) 99991-3556
- Horário: Aberto até as 18:00
- Áreas de Atuação: Direito Civil, Criminal, Trabalhista, Família e Sucessões, e Previdenciário.

Diretrizes:
1. Seja extremamente formal, cortês e profissional.
2. NUNCA dê conselhos jurídicos definitivos. Sempre sugira uma consulta presencial ou via WhatsApp para análise detalhada do caso.
3. Se o usuário perguntar sobre preços, diga que os honorários são avaliados caso a caso seguindo a tabela da OAB e a complexidade da demanda.
4. Responda em Português do Brasil.
5. Se não souber algo, direcione para o telefone de contato.";

const GREETING: &str =
    "Olá! Sou o assistente virtual do Dr. Alan Wesdra. Como posso ajudar com suas dúvidas jurídicas hoje?";

const EMPTY_REPLY_FALLBACK: &str =
    "Desculpe, tive um problema ao processar sua solicitação. Por favor, entre em contato via WhatsApp.";

const UNAVAILABLE_FALLBACK: &str =
    "No momento estou indisponível. Por favor, utilize nossos canais de contato tradicionais.";

/// Persona and canned sentences the assistant speaks with.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ChatProfile {
    pub system_instruction: String,
    pub greeting: String,
    pub empty_reply_fallback: String,
    pub unavailable_fallback: String,
}

impl Default for ChatProfile {
    fn default() -> Self {
        Self {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            greeting: GREETING.to_string(),
            empty_reply_fallback: EMPTY_REPLY_FALLBACK.to_string(),
            unavailable_fallback: UNAVAILABLE_FALLBACK.to_string(),
        }
    }
}

impl ChatProfile {
    /// Puts the built-in text back into every blank field and returns the
    /// names of the fields it replaced.
    pub fn restore_blank_fields(&mut self) -> Vec<&'static str> {
        let defaults = ChatProfile::default();
        let mut restored = Vec::new();
        let fields = [
            ("system_instruction", &mut self.system_instruction, defaults.system_instruction),
            ("greeting", &mut self.greeting, defaults.greeting),
            ("empty_reply_fallback", &mut self.empty_reply_fallback, defaults.empty_reply_fallback),
            ("unavailable_fallback", &mut self.unavailable_fallback, defaults.unavailable_fallback),
        ];
        for (name, value, default) in fields {
            if value.trim().is_empty() {
                *value = default;
                restored.push(name);
            }
        }
        restored
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub debug: bool,
    pub api_addr: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub profile: ChatProfile,
}

impl Config {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            api_addr: DEFAULT_API_ADDR.to_string(),
            api_key: "".to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            profile: ChatProfile::default(),
        }
    }
}

pub fn get_config_path() -> PathBuf {
    if let Ok(path) = std::env::var("WESDRA_CONFIG_PATH") {
        return PathBuf::from(path);
    }
    let mut config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config_dir.push("wesdra");
    config_dir.push("wesdra.config.json");
    config_dir
}

pub fn load_config() -> Config {
    let mut config = load_config_from(&get_config_path());
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config
}

/// Reads the config file at `config_path`, writing a default one first if
/// it does not exist yet. Any failure leaves the defaults in place.
pub fn load_config_from(config_path: &Path) -> Config {
    let mut config = Config::default();

    if !config_path.exists() {
        write_default_config(config_path, &config);
    }

    if let Ok(json) = std::fs::read_to_string(config_path) {
        let stripped = StripComments::new(json.as_bytes());
        match serde_json::from_reader(stripped) {
            Ok(file_config) => config = file_config,
            Err(e) => println!(
                "{} {} {}\n{}",
                "Failed to parse".red(),
                config_path.display().to_string().red(),
                format!(": {}", e).red(),
                "Using default config"
            ),
        }
    }

    let restored = config.profile.restore_blank_fields();
    if !restored.is_empty() {
        println!(
            "{}",
            format!("Blank profile fields in '{}' replaced with defaults: {}", config_path.display(), restored.join(", ")).red()
        );
    }

    config
}

fn write_default_config(config_path: &Path, config: &Config) {
    let Some(parent) = config_path.parent() else { return };
    if let Err(e) = std::fs::create_dir_all(parent) {
        println!(
            "{}",
            format!("Failed to create config directory '{}': {}", parent.display(), e).red()
        );
        return;
    }
    // The key is only ever taken from the environment on first run.
    let mut persisted = config.clone();
    persisted.api_key.clear();
    let default_json = serde_json::to_string_pretty(&persisted).unwrap_or_else(|_| "{}".to_string());
    if let Err(e) = std::fs::write(config_path, default_json) {
        println!(
            "{}",
            format!("Failed to write default config to '{}': {}", config_path.display(), e).red()
        );
    } else {
        println!(
            "{}",
            format!("Created default config at '{}'", config_path.display()).green()
        );
    }
}

/// Applies `WESDRA_*` environment overrides. The API key also honours the
/// generic `GEMINI_API_KEY` and `API_KEY` variables, most specific first.
pub fn apply_env_overrides<F>(config: &mut Config, var: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(debug) = var("WESDRA_DEBUG") { config.debug = debug.to_lowercase() == "true"; }
    if let Some(api_addr) = var("WESDRA_API_ADDR") { config.api_addr = api_addr; }
    if let Some(model) = var("WESDRA_MODEL") { config.model = model; }
    if let Some(temp) = var("WESDRA_TEMPERATURE") { if let Ok(t) = temp.parse() { config.temperature = t; } }

    let api_key = ["WESDRA_API_KEY", "GEMINI_API_KEY", "API_KEY"]
        .iter()
        .find_map(|key| var(key).filter(|v| !v.trim().is_empty()));
    if let Some(api_key) = api_key { config.api_key = api_key; }
}
