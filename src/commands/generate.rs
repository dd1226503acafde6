//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Folio;

/// Generate the listing page and every article page
pub fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    let generator = Generator::new(folio);
    let count = generator.generate()?;

    tracing::info!(
        "Generated {} articles into {:?} in {:.2}s",
        count,
        folio.public_dir,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
