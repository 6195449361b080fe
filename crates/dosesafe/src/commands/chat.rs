use std::io::{BufRead, Write};

use dosesafe_client::ChatSession;
use dosesafe_core::chatbot::{load_context, QUICK_QUESTIONS};
use dosesafe_core::validation::ValidationError;
use dosesafe_core::{ChatReply, ReplyType};

use super::Context;

fn format_reply(reply: &ChatReply) -> String {
    let prefix = match reply.reply_type {
        ReplyType::Warning => "[warning] ",
        ReplyType::Error => "[error] ",
        ReplyType::Info | ReplyType::Success => "",
    };
    let mut text = format!("{prefix}{}", reply.response);
    if reply.fallback {
        text.push_str("\n(offline answer)");
    }
    text
}

fn is_exit(line: &str) -> bool {
    matches!(line, "exit" | "quit" | "/exit" | "/quit")
}

/// Line-by-line conversation until EOF or `exit`
async fn converse<R: BufRead, W: Write>(
    session: &mut ChatSession<'_>,
    input: R,
    mut output: W,
) -> anyhow::Result<()> {
    writeln!(output, "{}\n", session.greeting())?;
    writeln!(output, "Type a question, or `exit` to leave.")?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if is_exit(line) {
            break;
        }
        match session.send(line).await {
            Ok(reply) => writeln!(output, "\n{}\n", format_reply(&reply))?,
            Err(dosesafe_client::ClientError::Invalid(ValidationError::EmptyMessage)) => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

pub async fn run(ctx: &Context, message: Option<&str>, questions: bool) -> anyhow::Result<()> {
    ctx.require_user()?;

    if questions {
        println!("Suggested questions:");
        for question in QUICK_QUESTIONS {
            println!("  - {question}");
        }
        return Ok(());
    }

    let context = load_context(&ctx.store);
    let client = ctx.client()?;
    let mut session = ChatSession::new(&client, context.as_ref());

    match message {
        Some(message) => {
            let reply = session.send(message).await?;
            println!("{}", format_reply(&reply));
        }
        None => {
            let stdin = std::io::stdin();
            converse(&mut session, stdin.lock(), std::io::stdout()).await?;
        }
    }
    Ok(())
}
