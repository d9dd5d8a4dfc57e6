mod common;

use common::TestEnv;
use mockito::{Matcher, Server, ServerGuard};
use prdgen::llm::prompts::{build_prd_prompt, PRD_SYSTEM_PROMPT};
use serde_json::{json, Value};

const TRANSCRIPT_TEXT: &str = "We need a login page. It must support SSO.";

fn env_for(fireflies: &ServerGuard, openai: &ServerGuard) -> TestEnv {
    TestEnv::new()
        .with_env("FIREFLIES_API_KEY", "ff-test")
        .with_env("OPENAI_API_KEY", "sk-test")
        .with_env(
            "PRDGEN_FIREFLIES_ENDPOINT",
            &format!("{}/graphql", fireflies.url()),
        )
        .with_env("PRDGEN_LLM_ENDPOINT", &format!("{}/v1", openai.url()))
}

fn session(requests: &[Value]) -> String {
    requests
        .iter()
        .map(|r| r.to_string() + "\n")
        .collect::<String>()
}

fn tool_call(id: u64, name: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": name, "arguments": {}}
    })
}

/// Body matcher for the exact system + user messages built from `transcript`.
fn prompt_for(transcript: &str) -> Matcher {
    Matcher::PartialJson(json!({
        "messages": [
            {"role": "system", "content": PRD_SYSTEM_PROMPT},
            {"role": "user", "content": build_prd_prompt(transcript)}
        ]
    }))
}

fn responses(stdout: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("stdout carries only JSON-RPC lines"))
        .collect()
}

fn tool_text(response: &Value) -> &str {
    response["result"]["content"][0]["text"]
        .as_str()
        .expect("tool result has text content")
}

#[test]
fn fetch_then_generate_reuses_cached_transcript() {
    let mut fireflies = Server::new();
    let mut openai = Server::new();

    let transcripts = fireflies
        .mock("POST", "/graphql")
        .match_header("authorization", "Bearer ff-test")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": {
                    "transcripts": [{
                        "id": "t1",
                        "date": "2024-01-01",
                        "sentences": [
                            {"text": "We need a login page."},
                            {"text": "It must support SSO."}
                        ]
                    }]
                }
            })
            .to_string(),
        )
        .expect(1)
        .create();

    let document = "# PRD\n\n## 1. Introduction\nSSO login.\n";
    let completion = openai
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(prompt_for(TRANSCRIPT_TEXT))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"choices": [{"message": {"content": document}}]}).to_string())
        .expect(1)
        .create();

    let env = env_for(&fireflies, &openai);
    let input = session(&[
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
        tool_call(3, "fetch_latest_transcript"),
        tool_call(4, "generate_prd"),
    ]);
    let output = env.run_with_stdin(&["serve"], &input);

    assert!(
        output.status.success(),
        "serve should exit cleanly on EOF\nstderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let responses = responses(&output.stdout);
    assert_eq!(responses.len(), 4, "notification must not be answered");

    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "PRDGenerator");
    assert_eq!(
        responses[1]["result"]["tools"].as_array().map(Vec::len),
        Some(2)
    );

    let fetched: Value = serde_json::from_str(tool_text(&responses[2])).unwrap();
    assert_eq!(
        fetched,
        json!({
            "id": "t1",
            "date": "2024-01-01",
            "text": TRANSCRIPT_TEXT,
            "status": "success"
        })
    );

    assert_eq!(responses[3]["result"]["isError"], false);
    assert_eq!(tool_text(&responses[3]), document);

    transcripts.assert();
    completion.assert();
}

#[test]
fn cold_generate_with_failing_fetch_never_calls_model() {
    let mut fireflies = Server::new();
    let mut openai = Server::new();

    let transcripts = fireflies
        .mock("POST", "/graphql")
        .with_status(500)
        .with_body("internal error")
        .expect(1)
        .create();
    let completion = openai
        .mock("POST", "/v1/chat/completions")
        .expect(0)
        .create();

    let env = env_for(&fireflies, &openai);
    let output = env.run_with_stdin(&["serve"], &session(&[tool_call(1, "generate_prd")]));

    assert!(output.status.success());
    let responses = responses(&output.stdout);
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["result"]["isError"], true);

    let payload: Value = serde_json::from_str(tool_text(&responses[0])).unwrap();
    assert_eq!(
        payload,
        json!({"error": "Failed to fetch transcript. Please run fetch_latest_transcript first."})
    );

    transcripts.assert();
    completion.assert();
}

#[test]
fn failed_refresh_still_generates_from_stale_transcript() {
    let mut fireflies = Server::new();
    let mut openai = Server::new();

    let ok = fireflies
        .mock("POST", "/graphql")
        .with_status(200)
        .with_body(
            json!({
                "data": {"transcripts": [{
                    "id": "old",
                    "date": 1704067200000u64,
                    "sentences": [{"text": "Stale"}, {"text": "notes."}]
                }]}
            })
            .to_string(),
        )
        .expect(1)
        .create();

    let _completion = openai
        .mock("POST", "/v1/chat/completions")
        .match_body(prompt_for("Stale notes."))
        .with_status(200)
        .with_body(json!({"choices": [{"message": {"content": "stale PRD"}}]}).to_string())
        .create();

    // Served once `ok` has had its single expected hit.
    let _failing = fireflies
        .mock("POST", "/graphql")
        .with_status(503)
        .create();

    let env = env_for(&fireflies, &openai);

    let input = session(&[
        tool_call(1, "fetch_latest_transcript"),
        tool_call(2, "fetch_latest_transcript"),
        tool_call(3, "generate_prd"),
    ]);
    let output = env.run_with_stdin(&["serve"], &input);

    assert!(output.status.success());
    let responses = responses(&output.stdout);
    assert_eq!(responses.len(), 3);

    let first: Value = serde_json::from_str(tool_text(&responses[0])).unwrap();
    assert_eq!(first["date"], "1704067200000");

    let second: Value = serde_json::from_str(tool_text(&responses[1])).unwrap();
    assert_eq!(second["status"], "error");
    assert!(second["message"].as_str().unwrap().contains("503"));

    assert_eq!(tool_text(&responses[2]), "stale PRD");
    ok.assert();
}

#[test]
fn malformed_line_does_not_stop_the_server() {
    let fireflies = Server::new();
    let openai = Server::new();
    let env = env_for(&fireflies, &openai);

    let input = "this is not json\n".to_string()
        + &session(&[json!({"jsonrpc": "2.0", "id": 7, "method": "ping"})]);
    let output = env.run_with_stdin(&["serve"], &input);

    assert!(output.status.success());
    let responses = responses(&output.stdout);
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[1]["id"], 7);
    assert_eq!(responses[1]["result"], json!({}));
}
