//! Render command handler

use super::utils::parse_tokens;
use crate::cli::RenderArgs;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use faultline_core::{MessageKind, RenderContext};

/// Handle the render command
pub fn handle_render(
    args: RenderArgs,
    ctx: &RenderContext,
    output: &mut OutputWriter,
) -> Result<()> {
    let timer = Timer::with_details("render", &args.key);
    let _entered = timer.span().enter();

    let tokens = parse_tokens(&args.tokens)?;
    let kind = MessageKind::from(args.kind);
    let message = ctx.message(kind, &args.key, args.locale.as_deref(), tokens);

    tracing::info!(key = %args.key, kind = %kind, locale = %message.locale(), "Rendered message");
    output.message(&message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{KindArg, OutputFormat};
    use faultline_core::ResourceCatalog;
    use std::sync::Arc;

    #[test]
    fn test_render_with_override_restores_locale() {
        let catalog = ResourceCatalog::builtin().with("fr", "forbidden", "Accès refusé.");
        let ctx = RenderContext::new(Arc::new(catalog), "en-US");
        let mut output =
            OutputWriter::with_writer(OutputFormat::Json, false, false, Box::new(std::io::sink()));

        handle_render(
            RenderArgs {
                key: "forbidden".to_string(),
                kind: KindArg::Forbidden,
                tokens: vec![],
                locale: Some("fr-CA".to_string()),
            },
            &ctx,
            &mut output,
        )
        .unwrap();

        assert_eq!(ctx.locale(), "en-US");
    }

    #[test]
    fn test_render_rejects_bad_token() {
        let ctx = RenderContext::with_builtin_catalog("en-US");
        let mut output =
            OutputWriter::with_writer(OutputFormat::Human, false, false, Box::new(std::io::sink()));

        let result = handle_render(
            RenderArgs {
                key: "info".to_string(),
                kind: KindArg::Information,
                tokens: vec!["type".to_string()],
                locale: None,
            },
            &ctx,
            &mut output,
        );
        assert!(result.is_err());
    }
}
