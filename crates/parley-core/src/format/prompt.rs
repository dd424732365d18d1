use super::FormattedPrompt;
use crate::context::ChatContext;
use parley_abi::{RoleId, Turn};

/// Render `history` and the new `question` into one completion prompt.
///
/// Lines are joined with `\n`: background, preset, one line per turn, then the
/// question behind the restart sequence. Human turns carry an extra leading
/// newline so exchanges read as separate paragraphs. The start sequence is
/// appended last with no separator to cue the reply.
///
/// Role names come from `ctx` at call time, so a rename applies to history too.
pub fn render_prompt(ctx: &ChatContext, history: &[Turn], question: &str) -> FormattedPrompt {
    let mut lines: Vec<String> = Vec::with_capacity(history.len() + 3);
    lines.push(ctx.background().to_string());
    lines.push(ctx.preset().to_string());
    for turn in history {
        let name = ctx.role_name(turn.role);
        lines.push(match turn.role {
            RoleId::Human => format!("\n{name}: {}", turn.text),
            RoleId::Ai => format!("{name}: {}", turn.text),
        });
    }
    lines.push(format!("\n{}{question}", ctx.restart_sequence()));

    let mut text = lines.join("\n");
    text.push_str(ctx.start_sequence());

    FormattedPrompt {
        text,
        stop_sequences: ctx.stop_sequences(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_context() -> ChatContext {
        let mut ctx = ChatContext::new();
        ctx.set_background("B");
        ctx.set_preset("P");
        ctx
    }

    #[test]
    fn empty_history() {
        let ctx = bare_context();
        let p = render_prompt(&ctx, ctx.turns(), "hi.");
        assert_eq!(p.text, "B\nP\n\n\nHuman: hi.\nAI: ");
        assert_eq!(p.stop_sequences, vec!["AI:", "Human:"]);
    }

    #[test]
    fn human_turns_get_a_blank_line() {
        let mut ctx = bare_context();
        ctx.append_exchange("q1.", "a1");
        let p = render_prompt(&ctx, ctx.turns(), "q2.");
        assert_eq!(p.text, "B\nP\n\nHuman: q1.\nAI: a1\n\n\nHuman: q2.\nAI: ");
    }

    #[test]
    fn renders_only_the_given_slice() {
        let mut ctx = bare_context();
        ctx.append_exchange("old.", "x");
        ctx.append_exchange("new.", "y");
        let p = render_prompt(&ctx, &ctx.turns()[2..], "q.");
        assert!(!p.text.contains("old."));
        assert!(p.text.contains("Human: new.\nAI: y"));
    }

    #[test]
    fn rename_applies_to_history() {
        let mut ctx = bare_context();
        ctx.append_exchange("q1.", "a1");
        ctx.set_human_role("Me");
        ctx.set_ai_role("Bot");
        let p = render_prompt(&ctx, ctx.turns(), "q2.");
        assert_eq!(p.text, "B\nP\n\nMe: q1.\nBot: a1\n\n\nMe: q2.\nBot: ");
        assert!(!p.text.contains("Human:"));
        assert_eq!(p.stop_sequences, vec!["Bot:", "Me:"]);
    }
}
