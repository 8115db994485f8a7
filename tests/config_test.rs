use nova_assistant_lib::actions::ActionTag;
use nova_assistant_lib::config::load_config_from;
use nova_assistant_lib::session::DialogueSession;
use nova_assistant_lib::tables::PhraseTables;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;

#[test]
fn configured_tables_and_name_drive_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let commands = dir.path().join("commands.json");
    let responses = dir.path().join("responses.json");
    let config = dir.path().join("config.toml");

    fs::write(
        &commands,
        r#"{"commands": {
            "coffee": {"phrases": ["kaffe"], "response": "{name} brygger kaffe.", "action": "brew"},
            "exit_app": {"phrases": ["sluta"], "response": "Adjö", "action": "exit_app"}
        }}"#,
    )
    .unwrap();
    fs::write(
        &responses,
        r#"{"responses": {"fallback": {"phrases": [], "responses": ["{name} vet inte."]}}}"#,
    )
    .unwrap();
    fs::write(
        &config,
        format!(
            "[assistant]\nname = \"Stella\"\nlegacy_keywords = false\n\n[data]\ncommands = {:?}\nresponses = {:?}\n",
            commands.display().to_string(),
            responses.display().to_string()
        ),
    )
    .unwrap();

    let config = load_config_from(&config).unwrap();
    let tables = PhraseTables::load(&config.data);
    let mut session = DialogueSession::new(tables, &config.assistant.name)
        .with_legacy_keywords(config.assistant.legacy_keywords)
        .with_rng(StdRng::seed_from_u64(1));

    let coffee = session.get_response("Lite KAFFE tack");
    assert_eq!(coffee.text, "Stella brygger kaffe.");
    assert_eq!(coffee.action, Some(ActionTag::Other("brew".to_string())));

    assert_eq!(session.get_response("tid").text, "Stella vet inte.");

    // exit_app 的内置回复优先于模板
    let exit = session.get_response("sluta nu");
    assert_eq!(exit.text, "Avslutar programmet. Hej då!");
    assert!(session.exit_requested());
}

#[test]
fn broken_table_file_degrades_to_minimal_table() {
    let dir = tempfile::tempdir().unwrap();
    let commands = dir.path().join("commands.json");
    fs::write(&commands, "{\"commands\": [").unwrap();

    let config = dir.path().join("config.toml");
    fs::write(
        &config,
        format!("[data]\ncommands = {:?}\n", commands.display().to_string()),
    )
    .unwrap();

    let config = load_config_from(&config).unwrap();
    let tables = PhraseTables::load(&config.data);
    assert_eq!(tables.commands, PhraseTables::minimal().commands);
    assert_eq!(tables.conversation, PhraseTables::bundled().conversation);
}
