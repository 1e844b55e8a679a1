use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use candle_core::{DType, Device, IndexOp, Result, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use candle_transformers::models::xlm_roberta::{
    Config as RobertaConfig, XLMRobertaForSequenceClassification,
};
use serde::Deserialize;

use super::utils::{CONFIG_FILE, WEIGHTS_FILE};

/// Labels assumed when `config.json` carries no `id2label` map.
const DEFAULT_LABELS: [&str; 3] = ["negative", "neutral", "positive"];

#[derive(Debug, Default, Deserialize)]
struct LabelMap {
    #[serde(default)]
    id2label: BTreeMap<String, String>,
}

impl LabelMap {
    fn into_labels(self) -> Result<Vec<String>> {
        if self.id2label.is_empty() {
            return Ok(DEFAULT_LABELS.iter().map(|l| l.to_string()).collect());
        }

        let mut indexed = self
            .id2label
            .into_iter()
            .map(|(id, label)| {
                id.parse::<usize>()
                    .map(|idx| (idx, label))
                    .map_err(|e| candle_core::Error::Msg(format!("bad id2label key '{id}': {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        indexed.sort_by_key(|(idx, _)| *idx);

        Ok(indexed.into_iter().map(|(_, label)| label).collect())
    }
}

fn read_config_json(model_dir: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(model_dir.join(CONFIG_FILE))?)
}

fn parse_json<T: serde::de::DeserializeOwned>(content: &str, what: &str) -> Result<T> {
    serde_json::from_str(content)
        .map_err(|e| candle_core::Error::Msg(format!("Failed to parse {what}: {e}")))
}

/// RoBERTa-family configs predating `position_embedding_type` omit it.
fn parse_roberta_config(content: &str) -> Result<RobertaConfig> {
    let mut value: serde_json::Value = parse_json(content, "config")?;
    if let Some(object) = value.as_object_mut() {
        object
            .entry("position_embedding_type")
            .or_insert_with(|| serde_json::Value::from("absolute"));
    }
    serde_json::from_value(value)
        .map_err(|e| candle_core::Error::Msg(format!("Failed to parse config: {e}")))
}

fn var_builder(model_dir: &Path, device: &Device) -> Result<VarBuilder<'static>> {
    let weights_path = model_dir.join(WEIGHTS_FILE);
    unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device) }
}

/// Sequence-classification checkpoints nest the encoder under `bert.` or
/// `roberta.`; bare sentence-transformer exports do not.
fn encoder_prefix(vb: &VarBuilder) -> Option<&'static str> {
    ["bert", "roberta"]
        .into_iter()
        .find(|prefix| vb.contains_tensor(&format!("{prefix}.embeddings.word_embeddings.weight")))
}

fn load_encoder(vb: &VarBuilder, config: &Config) -> Result<BertModel> {
    match encoder_prefix(vb) {
        Some(prefix) => BertModel::load(vb.pp(prefix), config),
        None => BertModel::load(vb.clone(), config),
    }
}

/// Bare encoder producing per-token hidden states (used for sentence embeddings).
#[derive(Clone)]
pub struct BertEncoder {
    model: Arc<BertModel>,
    hidden_size: usize,
}

impl BertEncoder {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config: Config = parse_json(&read_config_json(model_dir)?, "config")?;
        let vb = var_builder(model_dir, device)?;
        let model = load_encoder(&vb, &config)?;

        Ok(Self {
            model: Arc::new(model),
            hidden_size: config.hidden_size,
        })
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Returns hidden states shaped `[batch, seq_len, hidden_size]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        self.model
            .forward(input_ids, token_type_ids, attention_mask)
    }
}

/// BERT head: optional pooler (dense + tanh) then a single linear layer.
struct ClassificationHead {
    pooler: Option<Linear>,
    classifier: Linear,
}

impl ClassificationHead {
    fn load(vb: &VarBuilder, hidden_size: usize, num_labels: usize) -> Result<Self> {
        let pooler = if vb.contains_tensor("bert.pooler.dense.weight") {
            Some(candle_nn::linear(
                hidden_size,
                hidden_size,
                vb.pp("bert").pp("pooler").pp("dense"),
            )?)
        } else {
            None
        };
        let classifier = candle_nn::linear(hidden_size, num_labels, vb.pp("classifier"))?;

        Ok(Self { pooler, classifier })
    }

    fn forward(&self, cls_token: &Tensor) -> Result<Tensor> {
        match &self.pooler {
            Some(pooler) => self.classifier.forward(&pooler.forward(cls_token)?.tanh()?),
            None => self.classifier.forward(cls_token),
        }
    }
}

/// Encoder family of a sequence-classification checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierArchitecture {
    Bert,
    /// Position ids start after `pad_token_id`, dense + tanh + `out_proj` head.
    Roberta,
}

enum ClassifierBackend {
    Bert {
        encoder: BertModel,
        head: ClassificationHead,
    },
    Roberta(XLMRobertaForSequenceClassification),
}

struct SequenceClassificationImpl {
    backend: ClassifierBackend,
    labels: Vec<String>,
}

/// Encoder with a classification head over the first (`[CLS]` / `<s>`) token.
#[derive(Clone)]
pub struct BertClassifier(Arc<SequenceClassificationImpl>);

impl BertClassifier {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let content = read_config_json(model_dir)?;
        let labels = parse_json::<LabelMap>(&content, "labels")?.into_labels()?;

        let vb = var_builder(model_dir, device)?;
        let backend = if encoder_prefix(&vb) == Some("roberta") {
            let config = parse_roberta_config(&content)?;
            ClassifierBackend::Roberta(XLMRobertaForSequenceClassification::new(
                labels.len(),
                &config,
                vb,
            )?)
        } else {
            let config: Config = parse_json(&content, "config")?;
            ClassifierBackend::Bert {
                encoder: load_encoder(&vb, &config)?,
                head: ClassificationHead::load(&vb, config.hidden_size, labels.len())?,
            }
        };

        Ok(Self(Arc::new(SequenceClassificationImpl { backend, labels })))
    }

    /// Label names indexed by logit position.
    pub fn labels(&self) -> &[String] {
        &self.0.labels
    }

    pub fn architecture(&self) -> ClassifierArchitecture {
        match self.0.backend {
            ClassifierBackend::Bert { .. } => ClassifierArchitecture::Bert,
            ClassifierBackend::Roberta(_) => ClassifierArchitecture::Roberta,
        }
    }

    /// Returns logits shaped `[batch, num_labels]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        match &self.0.backend {
            ClassifierBackend::Bert { encoder, head } => {
                let output = encoder.forward(input_ids, token_type_ids, attention_mask)?;
                head.forward(&output.i((.., 0, ..))?)
            }
            ClassifierBackend::Roberta(model) => {
                let mask = match attention_mask {
                    Some(mask) => mask.clone(),
                    None => input_ids.ones_like()?,
                };
                model.forward(input_ids, &mask, token_type_ids)
            }
        }
    }
}
