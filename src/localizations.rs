use std::collections::HashMap;

// Simple in-memory translations
#[derive(Default)]
pub struct Translations {
    strings: HashMap<&'static str, &'static str>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, value: &'static str) {
        self.strings.insert(key, value);
    }

    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        self.strings.get(key).copied()
    }
}

pub struct Localizations {
    translations: HashMap<&'static str, Translations>,
    current_lang: String,
}

impl Localizations {
    pub fn new() -> Self {
        let mut translations = HashMap::new();

        // English translations
        let mut en = Translations::new();
        en.insert("app-title", "Media Downloader");
        en.insert("url-label", "Video/Audio URL:");
        en.insert("url-placeholder", "Enter video or audio URL");
        en.insert("platform-label", "Platform:");
        en.insert("options-title", "Download Options");
        en.insert("media-limit-label", "Media Limit:");
        en.insert("download-type-label", "Download Type:");
        en.insert("quality-label", "Video Quality:");
        en.insert("save-location-label", "Save Location:");
        en.insert("organize-by-label", "Organize by:");
        en.insert("browse-button", "Browse...");
        en.insert("download-button", "Start Download");
        en.insert("progress-title", "Download Progress");
        en.insert("error-no-url", "Please enter a video/audio URL");
        en.insert(
            "error-ytdlp-missing",
            "yt-dlp not found. Please install it and make sure it's in your PATH.",
        );
        translations.insert("en-US", en);

        // Spanish translations
        let mut es = Translations::new();
        es.insert("app-title", "Descargador de Medios");
        es.insert("url-label", "URL del video/audio:");
        es.insert("url-placeholder", "Ingrese la URL del video o audio");
        es.insert("platform-label", "Plataforma:");
        es.insert("options-title", "Opciones de descarga");
        es.insert("media-limit-label", "Límite de medios:");
        es.insert("download-type-label", "Tipo de descarga:");
        es.insert("quality-label", "Calidad de video:");
        es.insert("save-location-label", "Ubicación de guardado:");
        es.insert("organize-by-label", "Organizar por:");
        es.insert("browse-button", "Examinar...");
        es.insert("download-button", "Iniciar descarga");
        es.insert("progress-title", "Progreso de descarga");
        es.insert("error-no-url", "Por favor ingrese una URL de video/audio");
        es.insert(
            "error-ytdlp-missing",
            "No se encontró yt-dlp. Por favor instálelo y asegúrese de que esté en su PATH.",
        );
        translations.insert("es-ES", es);

        // Get system language
        let default_lang = if let Some(lang) = std::env::var("LANG")
            .ok()
            .and_then(|l| l.split('_').next().map(|s| s.to_lowercase()))
        {
            if lang == "es" {
                "es-ES"
            } else {
                "en-US"
            }
        } else {
            "en-US"
        };

        Self {
            translations,
            current_lang: default_lang.to_string(),
        }
    }

    pub fn lookup_single_language(&self, key: &str, _args: Option<&()>) -> Option<String> {
        self.translations
            .get(self.current_lang.as_str())
            .and_then(|t| t.lookup(key))
            .map(|s| s.to_string())
            .or_else(|| {
                // Fallback to English if the current language doesn't have the key
                if self.current_lang != "en-US" {
                    self.translations
                        .get("en-US")
                        .and_then(|t| t.lookup(key))
                        .map(|s| s.to_string())
                } else {
                    None
                }
            })
    }
}

impl Default for Localizations {
    fn default() -> Self {
        Self::new()
    }
}
