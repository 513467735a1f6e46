use crate::cli::utils::output_payload;
use crate::cli::OutputFormat;
use crate::locale::LayoutAttributes;

pub fn handle(locale: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let layout = LayoutAttributes::for_locale(locale);

    match output_format {
        OutputFormat::Json => output_payload(&output_format, &layout),
        OutputFormat::Text => {
            println!("lang={} dir={}", layout.lang, layout.dir.as_str());
            Ok(())
        }
    }
}
