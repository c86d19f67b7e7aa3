//! Kata Publishing Workflow
//!
//! This example walks a code kata through a nested review workflow.
//!
//! Key concepts:
//! - Group states (`published`, `beta`) that expand into their leaves
//! - A second independent attribute on the same type (`merge_status`)
//! - Side effects that only run when a transition succeeds
//! - Type-wide observers and a save cycle driven by tracked changes
//!
//! Run with: cargo run --example kata_workflow

use chrono::{DateTime, Utc};
use statetree::persistence::LifecycleHook;
use statetree::{states, HookContext, StateTransition, StateValues, Stateful, TypeRegistry};
use std::error::Error;
use stillwater::validation::Validation;

struct Kata {
    title: String,
    states: StateValues,
    published_at: Option<DateTime<Utc>>,
    approved_by: Option<String>,
    state_changes: usize,
}

impl Stateful for Kata {
    fn state_values(&self) -> &StateValues {
        &self.states
    }

    fn state_values_mut(&mut self) -> &mut StateValues {
        &mut self.states
    }
}

fn kata_registry() -> Result<TypeRegistry<Kata>, Box<dyn Error>> {
    let registry = TypeRegistry::builder()
        .register(
            "state",
            "draft",
            ["publish", "unpublish", "approve", "retire"],
            states! {
                draft => beta,
                published => {
                    beta => {
                        needs_feedback => [draft, needs_approval],
                        needs_approval => [draft, approved],
                    },
                    approved => retired,
                },
                retired => nil,
            },
        )?
        .register(
            "merge_status",
            "na",
            ["merge", "approve_merge", "reject_merge"],
            states! {
                na => pending,
                pending => [approved, rejected],
                approved => nil,
                rejected => pending,
            },
        )?
        .after_change(|kata: &mut Kata, transition: &StateTransition| {
            kata.state_changes += 1;
            println!(
                "  {} -> {} ({})",
                transition.from.as_ref().map_or("nil", |s| s.as_str()),
                transition.to,
                transition.attribute
            );
        })
        .on_hook(LifecycleHook::BeforeSave, |kata: &mut Kata, ctx: &HookContext| {
            println!("  saving {}: {} changed", kata.title, ctx.attribute);
        })
        .build();
    Ok(registry)
}

fn publish(registry: &TypeRegistry<Kata>, kata: &mut Kata) -> Result<bool, Box<dyn Error>> {
    registry
        .attribute("state")?
        .change_with(kata, "needs_feedback", |kata| {
            kata.published_at = Some(Utc::now());
            Ok(())
        })
}

fn approve(
    registry: &TypeRegistry<Kata>,
    kata: &mut Kata,
    approved_by: &str,
) -> Result<bool, Box<dyn Error>> {
    registry
        .attribute("state")?
        .change_strict_with(kata, "approved", |kata| {
            kata.approved_by = Some(approved_by.to_string());
            Ok(())
        })
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Kata Publishing Workflow ===\n");

    let registry = kata_registry()?;
    let state = registry.attribute("state")?;
    let merge_status = registry.attribute("merge_status")?;

    let mut kata = Kata {
        title: "Roman numerals".to_string(),
        states: registry.new_values(),
        published_at: None,
        approved_by: None,
        state_changes: 0,
    };
    kata.states.commit();

    println!("Step 1: Approve a draft");
    match approve(&registry, &mut kata, "reviewer") {
        Ok(_) => println!("  unexpected approval"),
        Err(error) => println!("  ✗ {error}"),
    }
    println!();

    println!("Step 2: Publish");
    publish(&registry, &mut kata)?;
    println!("  published at: {:?}", kata.published_at);
    println!(
        "  in beta: {}, published: {}",
        state.is(&kata, "beta"),
        state.is(&kata, "published")
    );
    println!();

    println!("Step 3: Move through review");
    state.change(&mut kata, "needs_approval");
    approve(&registry, &mut kata, "reviewer")?;
    println!("  approved by: {:?}", kata.approved_by);
    merge_status.change(&mut kata, "pending");
    println!();

    println!("Step 4: Save");
    if let Validation::Failure(errors) = registry.validate(&kata) {
        for error in errors.iter() {
            println!("  ✗ {error}");
        }
    }
    registry.process_transition_from_changes(&mut kata, LifecycleHook::BeforeSave);
    kata.states.commit();
    println!();

    println!("Path: {:?}", kata.states.history().path("state"));
    println!("Observed changes: {}", kata.state_changes);
    println!("Scopes:");
    for scope in state.scopes() {
        println!("  {} => {:?}", scope.name, scope.states);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
