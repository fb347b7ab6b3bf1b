use burn::{
    nn::{
        attention::generate_autoregressive_mask,
        loss::CrossEntropyLossConfig,
        transformer::{
            TransformerDecoder, TransformerDecoderConfig, TransformerDecoderInput,
            TransformerEncoder, TransformerEncoderConfig, TransformerEncoderInput,
        },
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct Seq2SeqConfig {
    pub vocab_size:  usize,
    pub max_seq_len: usize,
    pub d_model:     usize,
    pub num_heads:   usize,
    pub num_layers:  usize,
    pub d_ff:        usize,
    pub dropout:     f64,
    pub pad_id:      usize,
}

impl Seq2SeqConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Seq2SeqModel<B> {
        // One embedding table serves both sides: questions and
        // answers share the vocabulary.
        let token_embedding    = EmbeddingConfig::new(self.vocab_size, self.d_model).init(device);
        let position_embedding = EmbeddingConfig::new(self.max_seq_len, self.d_model).init(device);
        let encoder = TransformerEncoderConfig::new(
            self.d_model, self.d_ff, self.num_heads, self.num_layers,
        )
        .with_dropout(self.dropout)
        .init(device);
        let decoder = TransformerDecoderConfig::new(
            self.d_model, self.d_ff, self.num_heads, self.num_layers,
        )
        .with_dropout(self.dropout)
        .init(device);
        let output  = LinearConfig::new(self.d_model, self.vocab_size).init(device);
        let dropout = DropoutConfig::new(self.dropout).init();

        Seq2SeqModel {
            token_embedding, position_embedding, encoder, decoder, output, dropout,
            pad_id: self.pad_id,
        }
    }
}

#[derive(Module, Debug)]
pub struct Seq2SeqModel<B: Backend> {
    pub token_embedding:    Embedding<B>,
    pub position_embedding: Embedding<B>,
    pub encoder:            TransformerEncoder<B>,
    pub decoder:            TransformerDecoder<B>,
    pub output:             Linear<B>,
    pub dropout:            Dropout,
    pub pad_id:             usize,
}

impl<B: Backend> Seq2SeqModel<B> {
    /// questions: [batch, q_len], decoder_input: [batch, a_len]
    /// → logits: [batch, a_len, vocab_size]
    pub fn forward(
        &self,
        questions:     Tensor<B, 2, Int>,
        decoder_input: Tensor<B, 2, Int>,
    ) -> Tensor<B, 3> {
        let [batch_size, _] = questions.dims();
        let [_, target_len] = decoder_input.dims();

        // Pad positions carry no content — masked out of attention
        let source_pad_mask = questions.clone().equal_elem(self.pad_id as i32);
        let target_pad_mask = decoder_input.clone().equal_elem(self.pad_id as i32);

        let source = self.embed(questions);
        let target = self.embed(decoder_input);

        let memory = self.encoder.forward(
            TransformerEncoderInput::new(source).mask_pad(source_pad_mask.clone()),
        );

        // Causal mask: each answer position may only attend to
        // itself and earlier positions.
        let target_attn_mask =
            generate_autoregressive_mask::<B>(batch_size, target_len, &memory.device());

        let decoded = self.decoder.forward(
            TransformerDecoderInput::new(target, memory)
                .target_mask_pad(target_pad_mask)
                .target_mask_attn(target_attn_mask)
                .memory_mask_pad(source_pad_mask),
        );

        self.output.forward(decoded)
    }

    /// Teacher-forced loss over one batch.
    ///
    /// The decoder consumes the answer without its final token and
    /// predicts the answer shifted left by one, so every position
    /// learns the next token. Pad positions are excluded from the
    /// loss and the remaining targets are label-smoothed.
    pub fn forward_loss(
        &self,
        questions:       Tensor<B, 2, Int>,
        answers:         Tensor<B, 2, Int>,
        label_smoothing: f32,
    ) -> Tensor<B, 1> {
        let [batch_size, answer_len] = answers.dims();

        let decoder_input = answers.clone().slice([0..batch_size, 0..answer_len - 1]);
        let targets       = answers.slice([0..batch_size, 1..answer_len]);

        let logits = self.forward(questions, decoder_input);
        let [b, t, v] = logits.dims();

        let loss_fn = CrossEntropyLossConfig::new()
            .with_pad_tokens(Some(vec![self.pad_id]))
            .with_smoothing(Some(label_smoothing))
            .init(&logits.device());

        loss_fn.forward(logits.reshape([b * t, v]), targets.reshape([b * t]))
    }
}

impl<B: Backend> Seq2SeqModel<B> {
    fn embed(&self, ids: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        let [batch_size, seq_len] = ids.dims();

        let tok_emb = self.token_embedding.forward(ids);

        // Self-attention is permutation-invariant, so position must be injected explicitly.
        let positions = Tensor::<B, 1, Int>::arange(0..seq_len as i64, &tok_emb.device())
            .unsqueeze::<2>()
            .expand([batch_size, seq_len]);
        let pos_emb = self.position_embedding.forward(positions);

        self.dropout.forward(tok_emb + pos_emb)
    }
}
