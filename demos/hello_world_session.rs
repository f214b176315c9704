//! Hello World Session Example
//!
//! This example demonstrates how to:
//! - Build the standard skill
//! - Walk a screen device through launch, greeting, button press and start over
//! - Inspect the responses and session flags

use cim_domain_skill::{Directive, InboundEvent, Skill, SkillConfig, HELLO_WORLD_WITH_BUTTON_TOKEN};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== CIM Skill Domain Example ===\n");

    let assets = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets");
    let skill = Skill::standard(SkillConfig::default().with_assets_dir(assets));

    let turns = vec![
        ("Launch", InboundEvent::launch().with_screen()),
        (
            "Hello with button",
            InboundEvent::intent("HelloWorldWithButtonIntent").with_screen(),
        ),
        (
            "Button press",
            InboundEvent::user_event("fadeHelloTextButton")
                .with_screen()
                .with_visual_context(HELLO_WORLD_WITH_BUTTON_TOKEN),
        ),
        (
            "Start over",
            InboundEvent::intent("AMAZON.StartOverIntent")
                .with_screen()
                .with_visual_context(HELLO_WORLD_WITH_BUTTON_TOKEN),
        ),
        ("Stop", InboundEvent::intent("AMAZON.StopIntent").with_screen()),
    ];

    for (step, (label, event)) in turns.into_iter().enumerate() {
        let response = skill.handle_event(&event)?;

        println!("{}. {}", step + 1, label);
        println!("   Speech: {}", response.speech().unwrap_or("<none>"));
        if let Some(reprompt) = response.reprompt_text() {
            println!("   Reprompt: {}", reprompt);
        }
        for directive in &response.directives {
            let kind = match directive {
                Directive::RenderDocument { .. } => "render document",
                Directive::ExecuteCommands { .. } => "execute commands",
            };
            println!("   Directive: {} ({})", kind, directive.token());
        }
        println!("   Session ends: {}\n", response.ends_session());
    }

    println!("=== Example completed ===");
    Ok(())
}
