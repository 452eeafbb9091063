use super::types::VisitRule;
use std::path::PathBuf;

pub fn default_catalog() -> PathBuf {
    PathBuf::from("data/places.json")
}

pub fn default_max_time_hours() -> f64 {
    8.0
}

pub fn default_concurrency() -> usize {
    20
}

pub fn default_walking_speed_kmh() -> f64 {
    5.0
}

pub fn default_max_candidates() -> usize {
    20
}

pub fn default_max_stops() -> usize {
    5
}

pub fn default_visit_minutes() -> f64 {
    25.0
}

pub fn default_visit_rules() -> Vec<VisitRule> {
    vec![VisitRule {
        token: "парк".to_string(),
        minutes: 35.0,
    }]
}

pub fn default_directions_url() -> String {
    "https://api.openrouteservice.org/v2/directions/foot-walking".to_string()
}

pub fn default_directions_key_env() -> String {
    "ORS_API_KEY".to_string()
}

pub fn default_directions_timeout_sec() -> u64 {
    10
}

pub fn default_completion_url() -> String {
    "https://foundation-models.api.cloud.ru/v1".to_string()
}

pub fn default_completion_key_env() -> String {
    "GIGACHAT_API_KEY".to_string()
}

pub fn default_completion_model() -> String {
    "GigaChat/GigaChat-2-Max".to_string()
}

pub fn default_temperature() -> f32 {
    0.6
}

pub fn default_max_tokens() -> u32 {
    120
}

pub fn default_top_p() -> f32 {
    0.95
}

pub fn default_completion_timeout_sec() -> u64 {
    30
}

pub fn default_prompt_template() -> String {
    "Вы — дружелюбный и знающий гид по Нижнему Новгороду.\n\
     Пользователь интересуется: «{interests}».\n\
     Объясните кратко (1–2 предложения), почему стоит посетить «{title}».\n\
     Описание объекта: {description}...\n\
     Ответ должен быть живым, увлекательным и персонализированным. \
     Начните с фразы вроде «Здесь вы сможете...» или «Это идеально подходит, потому что...»."
        .to_string()
}

pub fn default_fallback_template() -> String {
    "Подобрано по вашему интересу: «{interests}».".to_string()
}

pub fn default_description_chars() -> usize {
    600
}

pub fn default_max_attempts() -> u32 {
    2
}

pub fn default_backoff_base_ms() -> u64 {
    500
}

pub fn default_embedder_url() -> String {
    "http://localhost:8080/v1".to_string()
}

pub fn default_embedder_key_env() -> String {
    "EMBEDDINGS_API_KEY".to_string()
}

pub fn default_embedder_model() -> String {
    "paraphrase-multilingual-MiniLM-L12-v2".to_string()
}

pub fn default_embedder_timeout_sec() -> u64 {
    30
}
