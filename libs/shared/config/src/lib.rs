use std::env;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgREST tables behind the configured Supabase project
    Supabase,
    /// Process-local store, lost on restart
    Memory,
}

/// Details shown on the public contact page.
#[derive(Debug, Clone)]
pub struct ContactSettings {
    pub address: String,
    pub phone: String,
    pub email: String,
    pub facebook: String,
    pub twitter: String,
    pub youtube: String,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            address: "Rua Gaudêncio Yoda Mestre Kame, Nº 00".to_string(),
            phone: "+83 00000000".to_string(),
            email: "joeberth.souza@ccc.ufcg.edu.br".to_string(),
            facebook: "fb.com".to_string(),
            twitter: "twitter.com/joeberth".to_string(),
            youtube: "youtube.com".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_jwt_secret: String,
    pub storage_backend: StorageBackend,
    pub port: u16,
    pub seed_provider_ids: Vec<i64>,
    pub contact: ContactSettings,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let supabase_url = env::var("SUPABASE_URL")
            .unwrap_or_else(|_| {
                warn!("SUPABASE_URL not set, using empty value");
                String::new()
            });
        let supabase_anon_key = env::var("SUPABASE_ANON_PUBLIC_KEY")
            .unwrap_or_else(|_| {
                warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                String::new()
            });
        let supabase_jwt_secret = env::var("SUPABASE_JWT_SECRET")
            .unwrap_or_else(|_| {
                warn!("SUPABASE_JWT_SECRET not set, using empty value");
                String::new()
            });

        let storage_backend = match env::var("STORAGE_BACKEND").ok().as_deref() {
            Some("supabase") => StorageBackend::Supabase,
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                warn!("Unknown STORAGE_BACKEND '{}', falling back to memory", other);
                StorageBackend::Memory
            }
            None if !supabase_url.is_empty() && !supabase_anon_key.is_empty() => {
                StorageBackend::Supabase
            }
            None => {
                warn!("STORAGE_BACKEND not set and Supabase not configured, using memory");
                StorageBackend::Memory
            }
        };

        let port = env::var("PORT")
            .ok()
            .and_then(|raw| match raw.parse::<u16>() {
                Ok(port) => Some(port),
                Err(_) => {
                    warn!("PORT '{}' is not a valid port, using default", raw);
                    None
                }
            })
            .unwrap_or(3000);

        let seed_provider_ids = env::var("SEED_PROVIDER_IDS")
            .map(|raw| parse_id_list(&raw))
            .unwrap_or_default();

        let defaults = ContactSettings::default();
        let contact = ContactSettings {
            address: env::var("CONTACT_ADDRESS").unwrap_or(defaults.address),
            phone: env::var("CONTACT_PHONE").unwrap_or(defaults.phone),
            email: env::var("CONTACT_EMAIL").unwrap_or(defaults.email),
            facebook: env::var("CONTACT_FACEBOOK").unwrap_or(defaults.facebook),
            twitter: env::var("CONTACT_TWITTER").unwrap_or(defaults.twitter),
            youtube: env::var("CONTACT_YOUTUBE").unwrap_or(defaults.youtube),
        };

        let config = Self {
            supabase_url,
            supabase_anon_key,
            supabase_jwt_secret,
            storage_backend,
            port,
            seed_provider_ids,
            contact,
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_jwt_secret.is_empty()
            && (self.storage_backend == StorageBackend::Memory
                || (!self.supabase_url.is_empty() && !self.supabase_anon_key.is_empty()))
    }
}

fn parse_id_list(raw: &str) -> Vec<i64> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| match part.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!("Ignoring invalid provider id '{}' in SEED_PROVIDER_IDS", part);
                None
            }
        })
        .collect()
}
