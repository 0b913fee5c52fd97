//! End-to-end interpreter tests.
//!
//! These tests drive whole USSD dialogs through the public API: a template
//! tree, a session store, and one interpreter handling a sequence of
//! inbound requests.

use std::sync::Arc;

use ussd_engine::{
    Config, Interpreter, Node, Reply, SessionId, SessionState, SessionStore, UssdError,
};

/// Helper to build an interpreter over a fresh store.
fn engine() -> Interpreter {
    Interpreter::new(Arc::new(SessionStore::new()))
}

/// Helper for a typical mobile-money style template.
///
/// ```text
/// <screen>
///   <menu text="Mobile Money">
///     <option text="Check balance"><response text="Balance: KES 120"/></option>
///     <option text="Register">
///       <input text="Enter your name:" name="name"/>
///       <response text="Registered."/>
///     </option>
///     <option text="Exit" goto="bye"/>
///   </menu>
///   <response id="bye" text="Goodbye."/>
/// </screen>
/// ```
fn mobile_money_tree() -> Node {
    Node::new("screen")
        .child(
            Node::new("menu")
                .attr("text", "Mobile Money")
                .child(
                    Node::new("option")
                        .attr("text", "Check balance")
                        .child(Node::new("response").attr("text", "Balance: KES 120")),
                )
                .child(
                    Node::new("option")
                        .attr("text", "Register")
                        .child(Node::new("input").attr("text", "Enter your name:").attr("name", "name"))
                        .child(Node::new("response").attr("text", "Registered.")),
                )
                .child(Node::new("option").attr("text", "Exit").attr("goto", "bye")),
        )
        .child(Node::new("response").attr("id", "bye").attr("text", "Goodbye."))
}

// ============================================================================
// Terminal Response Tests
// ============================================================================

#[test]
fn test_response_root_ends_session() {
    let tree = Node::new("response").attr("text", "Thank you.");
    let engine = engine();
    let id = SessionId::from("sess-1");

    let reply = engine.handle_request(&id, &tree, None).unwrap();
    assert_eq!(reply, Reply::ended("Thank you."));

    let session = engine.store().get(&id).unwrap().unwrap();
    assert_eq!(session.state, SessionState::Terminated);
}

#[test]
fn test_terminated_session_rejects_further_requests() {
    let tree = Node::new("response").attr("text", "Thank you.");
    let engine = engine();
    let id = SessionId::from("sess-1");

    engine.handle_request(&id, &tree, None).unwrap();

    for attempt in 0..3 {
        let err = engine.handle_request(&id, &tree, None).unwrap_err();
        assert!(
            matches!(err, UssdError::SessionEnded(ref s) if s == "sess-1"),
            "attempt {attempt} should be rejected"
        );
    }
}

#[test]
fn test_response_without_text_propagates_missing_attribute() {
    let tree = Node::new("response");
    let engine = engine();

    let err = engine
        .handle_request(&SessionId::from("sess-1"), &tree, None)
        .unwrap_err();
    assert!(matches!(
        err,
        UssdError::MissingAttribute { ref tag, ref attribute }
            if tag == "response" && attribute == "text"
    ));
}

#[test]
fn test_unknown_tag_propagates() {
    let tree = Node::new("marquee").attr("text", "90s vibes");
    let engine = engine();

    let err = engine
        .handle_request(&SessionId::from("sess-1"), &tree, None)
        .unwrap_err();
    assert!(matches!(err, UssdError::UnknownTag { ref tag } if tag == "marquee"));
}

// ============================================================================
// Menu Dialog Tests
// ============================================================================

#[test]
fn test_menu_prompt_then_balance() {
    let tree = mobile_money_tree();
    let engine = engine();
    let id = SessionId::from("sess-1");

    let reply = engine.handle_request(&id, &tree, None).unwrap();
    assert!(!reply.session_ended);
    assert_eq!(
        reply.text,
        "Mobile Money\n1. Check balance\n2. Register\n3. Exit"
    );

    let reply = engine.handle_request(&id, &tree, Some("1")).unwrap();
    assert_eq!(reply, Reply::ended("Balance: KES 120"));
}

#[test]
fn test_menu_option_with_goto() {
    let tree = mobile_money_tree();
    let engine = engine();
    let id = SessionId::from("sess-1");

    engine.handle_request(&id, &tree, None).unwrap();
    let reply = engine.handle_request(&id, &tree, Some("3")).unwrap();
    assert_eq!(reply, Reply::ended("Goodbye."));
}

#[test]
fn test_menu_invalid_choice_reprompts() {
    let tree = mobile_money_tree();
    let engine = engine();
    let id = SessionId::from("sess-1");

    let prompt = engine.handle_request(&id, &tree, None).unwrap();

    // Out of range and non-numeric picks re-ask the same question
    for bad in ["9", "0", "balance"] {
        let reply = engine.handle_request(&id, &tree, Some(bad)).unwrap();
        assert_eq!(reply, prompt, "input {bad:?} should re-prompt");
    }

    // The session is still usable afterwards
    let reply = engine.handle_request(&id, &tree, Some("1")).unwrap();
    assert!(reply.session_ended);
}

// ============================================================================
// Input Collection Tests
// ============================================================================

#[test]
fn test_input_collected_across_requests() {
    let tree = mobile_money_tree();
    let engine = engine();
    let id = SessionId::from("sess-1");

    engine.handle_request(&id, &tree, None).unwrap();
    let reply = engine.handle_request(&id, &tree, Some("2")).unwrap();
    assert_eq!(reply, Reply::prompt("Enter your name:"));

    let reply = engine.handle_request(&id, &tree, Some("Amina")).unwrap();
    assert_eq!(reply, Reply::ended("Registered."));

    let session = engine.store().get(&id).unwrap().unwrap();
    assert_eq!(session.variables.get("name"), Some("Amina"));
    assert_eq!(session.variables.last_input(), Some("Amina"));
}

#[test]
fn test_variable_assignment_flows_through() {
    let tree = Node::new("screen")
        .child(Node::new("variable").attr("name", "network").attr("value", "MTN"))
        .child(Node::new("response").attr("text", "Done"));
    let engine = engine();
    let id = SessionId::from("sess-1");

    engine.handle_request(&id, &tree, None).unwrap();

    let session = engine.store().get(&id).unwrap().unwrap();
    assert_eq!(session.variables.get("network"), Some("MTN"));
}

// ============================================================================
// Session Isolation Tests
// ============================================================================

#[test]
fn test_sessions_are_isolated() {
    let tree = mobile_money_tree();
    let engine = engine();
    let alice = SessionId::from("alice");
    let bob = SessionId::from("bob");

    engine.handle_request(&alice, &tree, None).unwrap();
    engine.handle_request(&bob, &tree, None).unwrap();

    // Alice finishes; Bob's session keeps going
    let reply = engine.handle_request(&alice, &tree, Some("1")).unwrap();
    assert!(reply.session_ended);

    let reply = engine.handle_request(&bob, &tree, Some("2")).unwrap();
    assert_eq!(reply, Reply::prompt("Enter your name:"));
}

#[test]
fn test_concurrent_sessions() {
    use std::thread;

    let tree = Arc::new(mobile_money_tree());
    let engine = Arc::new(engine());
    let mut handles = vec![];

    for n in 0..32 {
        let engine = Arc::clone(&engine);
        let tree = Arc::clone(&tree);
        handles.push(thread::spawn(move || {
            let id = SessionId::from(format!("sess-{n}").as_str());
            engine.handle_request(&id, &tree, None).unwrap();
            engine.handle_request(&id, &tree, Some("1")).unwrap()
        }));
    }

    for h in handles {
        let reply = h.join().unwrap();
        assert_eq!(reply, Reply::ended("Balance: KES 120"));
    }
    assert_eq!(engine.store().count(), 32);
}

// ============================================================================
// Redirect Tests
// ============================================================================

#[test]
fn test_redirect_to_named_screen() {
    let tree = Node::new("screen")
        .child(Node::new("redirect").attr("to", "farewell"))
        .child(Node::new("response").attr("id", "farewell").attr("text", "Bye."));
    let engine = engine();

    let reply = engine
        .handle_request(&SessionId::from("sess-1"), &tree, None)
        .unwrap();
    assert_eq!(reply, Reply::ended("Bye."));
}

#[test]
fn test_redirect_cycle_is_bounded() {
    let tree = Node::new("screen")
        .attr("id", "top")
        .child(Node::new("redirect").attr("to", "top"));
    let engine = Interpreter::new(Arc::new(SessionStore::new())).step_limit(16);

    let err = engine
        .handle_request(&SessionId::from("sess-1"), &tree, None)
        .unwrap_err();
    assert!(matches!(err, UssdError::StepLimitExceeded { limit: 16 }));
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[test]
fn test_interpreter_from_config_file() {
    use std::io::Write;

    let json = r#"{ "engine": { "step_limit": 4 } }"#;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let config = Config::from_file(file.path()).unwrap();
    let engine = Interpreter::from_config(Arc::new(SessionStore::new()), &config);

    let tree = Node::new("screen")
        .attr("id", "top")
        .child(Node::new("redirect").attr("to", "top"));
    let err = engine
        .handle_request(&SessionId::from("sess-1"), &tree, None)
        .unwrap_err();
    assert!(matches!(err, UssdError::StepLimitExceeded { limit: 4 }));
}

#[test]
fn test_store_purge_after_termination() {
    let tree = Node::new("response").attr("text", "Thank you.");
    let engine = engine();
    let id = SessionId::from("sess-1");

    engine.handle_request(&id, &tree, None).unwrap();
    assert_eq!(engine.store().count(), 1);

    let config = Config::default();
    let purged = engine.store().purge(config.max_idle()).unwrap();
    assert_eq!(purged, 1);
    assert_eq!(engine.store().count(), 0);
}
