//! ONNX Runtime sequence classifier for contract clauses.
//!
//! Expects a fine-tuned sequence-classification export (e.g. distilroberta)
//! in a directory containing `model.onnx` and `tokenizer.json`. The model
//! takes `input_ids` and `attention_mask` and returns logits of shape
//! `[batch, labels]`, where label `i` is `LabelSpace::category_at(i)`.

use std::path::Path;

use lexguard_core::LabelSpace;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::info;

use crate::classifier::{ClauseClassifier, Prediction, argmax, softmax};

/// Maximum tokens per paragraph; longer inputs are truncated.
const MAX_TOKENS: usize = 512;

/// Paragraphs per inference call.
const BATCH_SIZE: usize = 8;

pub struct OnnxClassifier {
    session: Session,
    tokenizer: Tokenizer,
    labels: LabelSpace,
}

impl OnnxClassifier {
    /// Load a classifier from a directory containing `model.onnx` and `tokenizer.json`.
    pub fn load(model_dir: &Path, labels: LabelSpace) -> anyhow::Result<Self> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        anyhow::ensure!(model_path.exists(), "model.onnx not found in {model_dir:?}");
        anyhow::ensure!(
            tokenizer_path.exists(),
            "tokenizer.json not found in {model_dir:?}"
        );
        anyhow::ensure!(!labels.is_empty(), "label space is empty");

        let session = Session::builder()?.commit_from_file(&model_path)?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("load tokenizer: {e}"))?;
        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: MAX_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("set truncation: {e}"))?;
        tokenizer.with_padding(Some(tokenizers::PaddingParams {
            ..Default::default()
        }));

        info!(
            labels = labels.len(),
            model = %model_path.display(),
            "loaded clause classifier"
        );
        Ok(Self {
            session,
            tokenizer,
            labels,
        })
    }

    pub fn labels(&self) -> &LabelSpace {
        &self.labels
    }

    fn run_batch(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Prediction>> {
        let batch_size = texts.len();

        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| anyhow::anyhow!("tokenize: {e}"))?;

        let seq_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0);

        let mut input_ids = vec![0i64; batch_size * seq_len];
        let mut attention_mask = vec![0i64; batch_size * seq_len];
        for (i, encoding) in encodings.iter().enumerate() {
            let offset = i * seq_len;
            for (j, &id) in encoding.get_ids().iter().enumerate() {
                input_ids[offset + j] = id as i64;
            }
            for (j, &mask) in encoding.get_attention_mask().iter().enumerate() {
                attention_mask[offset + j] = mask as i64;
            }
        }

        let shape = [batch_size as i64, seq_len as i64];
        let ids_tensor = Tensor::from_array((shape, input_ids.into_boxed_slice()))?;
        let mask_tensor = Tensor::from_array((shape, attention_mask.into_boxed_slice()))?;

        let outputs = self.session.run(ort::inputs![
            "input_ids" => ids_tensor,
            "attention_mask" => mask_tensor,
        ])?;

        let (output_shape, logits) = outputs[0].try_extract_tensor::<f32>()?;
        let dims: &[i64] = output_shape;
        let num_labels = self.labels.len();
        anyhow::ensure!(
            dims.len() == 2 && dims[0] as usize == batch_size && dims[1] as usize == num_labels,
            "unexpected logits shape: {dims:?}, expected [{batch_size}, {num_labels}]"
        );

        let mut predictions = Vec::with_capacity(batch_size);
        for row in logits.chunks(num_labels) {
            let probs = softmax(row);
            let (index, score) =
                argmax(&probs).ok_or_else(|| anyhow::anyhow!("empty logits row"))?;
            let category = self
                .labels
                .category_at(index)
                .ok_or_else(|| anyhow::anyhow!("model label {index} outside label space"))?;
            predictions.push(Prediction { category, score });
        }
        Ok(predictions)
    }
}

impl ClauseClassifier for OnnxClassifier {
    fn classify_batch(&mut self, texts: &[&str]) -> anyhow::Result<Vec<Prediction>> {
        let mut predictions = Vec::with_capacity(texts.len());
        for batch in texts.chunks(BATCH_SIZE) {
            predictions.extend(self.run_batch(batch)?);
        }
        Ok(predictions)
    }
}
