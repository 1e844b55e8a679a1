//! Test fixtures for integration tests.

use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use url_validity::record::{EvaluationRequest, EvaluationRow};

pub const SAMPLE_PROMPTS: [&str; 8] = [
    "What are the symptoms of flu?",
    "How to bake a chocolate cake?",
    "Tell me about the history of Ancient Rome.",
    "What are the side effects of ibuprofen?",
    "Best exercises for weight loss?",
    "How do I improve my sleep quality?",
    "Tell me about the benefits of meditation.",
    "What is quantum computing?",
];

/// Paths served by the test HTTP server, relative to its base URL.
pub const SAMPLE_PATHS: [&str; 6] = [
    "/health/flu",
    "/food/chocolate-cake",
    "/history/rome",
    "/health/ibuprofen",
    "/fitness/weight-loss",
    "/science/quantum",
];

pub const DEFAULT_SEED: u64 = 42;

/// Human ratings in 1..=5, reproducible for a given seed.
pub fn random_ratings(seed: u64, count: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| rng.gen_range(1..=5)).collect()
}

/// Pairs randomly chosen prompts with randomly chosen pages under `base_url`.
pub fn sample_requests(seed: u64, base_url: &str, count: usize) -> Vec<EvaluationRequest> {
    let mut rng = StdRng::seed_from_u64(seed);
    let ratings = random_ratings(seed, count);

    ratings
        .into_iter()
        .map(|rating| {
            let prompt = SAMPLE_PROMPTS.choose(&mut rng).copied().unwrap_or_default();
            let path = SAMPLE_PATHS.choose(&mut rng).copied().unwrap_or_default();
            EvaluationRequest::new(prompt, format!("{base_url}{path}"), rating)
                .expect("fixture ratings are in range")
        })
        .collect()
}

/// HTML page whose `<p>` elements hold `paragraphs`, wrapped in some chrome.
pub fn page_html(title: &str, paragraphs: &[&str]) -> String {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<p>{p}</p>\n"))
        .collect();
    format!(
        "<!doctype html><html><head><title>{title}</title>\
         <script>var tracking = 1;</script></head>\
         <body><nav><a href=\"/\">Home</a></nav><h1>{title}</h1>\n{body}\
         <footer>Copyright</footer></body></html>"
    )
}

/// Writes `requests` as a batch input CSV.
pub fn write_requests_csv(path: &Path, requests: &[EvaluationRequest]) {
    let mut writer = csv::Writer::from_path(path).expect("create request csv");
    for request in requests {
        writer.serialize(request).expect("write request");
    }
    writer.flush().expect("flush request csv");
}

#[derive(Default)]
pub struct EvaluationRowBuilder {
    user_prompt: Option<String>,
    url_to_check: Option<String>,
    func_rating: Option<f64>,
    custom_rating: Option<u8>,
}

impl EvaluationRowBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_prompt(mut self, prompt: &str) -> Self {
        self.user_prompt = Some(prompt.to_string());
        self
    }

    pub fn url_to_check(mut self, url: &str) -> Self {
        self.url_to_check = Some(url.to_string());
        self
    }

    pub fn func_rating(mut self, rating: f64) -> Self {
        self.func_rating = Some(rating);
        self
    }

    pub fn custom_rating(mut self, rating: u8) -> Self {
        self.custom_rating = Some(rating);
        self
    }

    pub fn build(self) -> EvaluationRow {
        EvaluationRow {
            user_prompt: self
                .user_prompt
                .unwrap_or_else(|| SAMPLE_PROMPTS[0].to_string()),
            url_to_check: self
                .url_to_check
                .unwrap_or_else(|| "https://www.cdc.gov/flu".to_string()),
            func_rating: self.func_rating.unwrap_or(25.0),
            custom_rating: self.custom_rating.unwrap_or(3),
        }
    }
}

/// `count` distinct rows with seeded ratings.
pub fn create_rows(seed: u64, count: usize) -> Vec<EvaluationRow> {
    random_ratings(seed, count)
        .into_iter()
        .enumerate()
        .map(|(i, rating)| {
            EvaluationRowBuilder::new()
                .user_prompt(SAMPLE_PROMPTS[i % SAMPLE_PROMPTS.len()])
                .url_to_check(&format!("https://example.org/page/{i}"))
                .func_rating(i as f64 * 2.5)
                .custom_rating(rating)
                .build()
        })
        .collect()
}
