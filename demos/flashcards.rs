//! Flashcards from a Short Chapter
//!
//! Chunk a document, then build its deck without a language model.
//!
//! ```bash
//! RUST_LOG=microcards=debug cargo run --example flashcards
//! ```

use microcards::{DeckPipeline, PipelineConfig};

const CHAPTER: &str = r"PHOTOSYNTHESIS

Photosynthesis is defined as the process by which plants convert light into energy. It takes place in the chloroplasts of leaf cells. For example, chlorophyll absorbs red and blue light while reflecting green. The light reactions split water and release oxygen as a by-product. The Calvin cycle then fixes carbon dioxide into sugar. Dr. Melvin Calvin traced this pathway with carbon-14 in the 1950s.

CELLULAR RESPIRATION

In contrast, cellular respiration releases the energy stored in sugar. Mitochondria break glucose down in several stages. Glycolysis happens in the cytoplasm and yields two molecules of ATP. The Krebs cycle and the electron transport chain then produce roughly 34 more. Oxygen is the final electron acceptor, which is why animals need to breathe. Without oxygen, cells fall back to fermentation and produce far less energy.

In summary, photosynthesis stores energy in sugar and respiration releases it. Remember that the two processes form a cycle: the oxygen from one feeds the other.";

#[tokio::main]
async fn main() -> microcards::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let pipeline = DeckPipeline::new(PipelineConfig::default())?;

    let chunks = pipeline.plan(CHAPTER)?;
    println!("Chunks: {}\n", chunks.len());
    for chunk in &chunks {
        println!("{chunk}");
        println!("  keywords: {}", chunk.keywords.join(", "));
    }

    let cards = pipeline.build_deck(CHAPTER, Some("Energy in Living Things")).await?;
    println!("\nCards: {}\n", cards.len());
    for card in &cards {
        println!("{} [{}] {} ({:?})", card.emoji, card.order, card.headline, card.difficulty);
        println!("  {}", card.detail_paragraph);
        for bullet in &card.bullet_points {
            println!("  - {bullet}");
        }
        if !card.ghost_words.is_empty() {
            println!("  ghost words: {}", card.ghost_words.join(", "));
        }
        if let (Some(question), Some(answer)) = (&card.quiz_question, card.quiz_answer) {
            println!("  quiz: {question} -> {answer}");
        }
        println!();
    }

    Ok(())
}
