//! Decoding of bridge lines as a bridge would actually send them.

use afk_proto::{
    Inbound, MessageId, Notice, Outbound, RequestAction, ResponseStatus, RoomId, ScopePrompt,
    UserId,
};
use chrono::{TimeZone, Utc};

#[test]
fn decodes_message_event() {
    let line = r#"{"type":"message","id":"m1","room":"r1","author":{"id":"u1","name":"ann","bot":false},"content":"hello <@u2>","mentions":[{"id":"u2","name":"bob"}],"can_manage_messages":true}"#;
    let Inbound::Message(event) = Inbound::from_line(line).unwrap() else {
        panic!("expected message");
    };
    assert_eq!(event.id, MessageId::new("m1"));
    assert_eq!(event.room, Some(RoomId::new("r1")));
    assert_eq!(event.mentions.len(), 1);
    assert_eq!(event.mentions[0].id, UserId::new("u2"));
    assert!(event.can_manage_messages);
}

#[test]
fn decodes_scope_choice_from_direct_conversation() {
    let line = r#"{"type":"scope_chosen","user":{"id":"u1","name":"ann"},"global":true,"reason":"sleep"}"#;
    let Inbound::ScopeChosen(choice) = Inbound::from_line(line).unwrap() else {
        panic!("expected scope choice");
    };
    assert!(choice.global);
    assert!(choice.room.is_none());
    assert_eq!(choice.reason.as_deref(), Some("sleep"));
    assert!(choice.prompt.is_none());
}

#[test]
fn decodes_fetch_response() {
    let line = r#"{"type":"response","request_id":7,"status":{"outcome":"ok","messages":[{"id":"m9","author":"u3","bot":true,"created_at":"2024-05-01T12:00:00Z"}]}}"#;
    let Inbound::Response(response) = Inbound::from_line(line).unwrap() else {
        panic!("expected response");
    };
    assert_eq!(response.request_id, 7);
    let ResponseStatus::Ok { messages } = response.status else {
        panic!("expected ok");
    };
    assert_eq!(messages.len(), 1);
    assert!(messages[0].bot);
    assert_eq!(
        messages[0].created_at,
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    );
}

#[test]
fn decodes_error_response_without_messages() {
    let line = r#"{"type":"response","request_id":2,"status":{"outcome":"error","message":"Unknown Message"}}"#;
    let Inbound::Response(response) = Inbound::from_line(line).unwrap() else {
        panic!("expected response");
    };
    assert_eq!(
        response.status,
        ResponseStatus::Error {
            message: "Unknown Message".to_string()
        }
    );
}

#[test]
fn rejects_unknown_type() {
    assert!(Inbound::from_line(r#"{"type":"typing"}"#).is_err());
    assert!(Inbound::from_line("not json").is_err());
}

#[test]
fn encodes_delete_many_request() {
    let out = Outbound::Request(afk_proto::BridgeRequest {
        request_id: 3,
        action: RequestAction::DeleteMany {
            room: RoomId::new("r1"),
            messages: vec![MessageId::new("a"), MessageId::new("b")],
        },
    });
    assert_eq!(
        out.to_line().unwrap(),
        r#"{"type":"request","request_id":3,"action":{"kind":"delete_many","room":"r1","messages":["a","b"]}}"#
    );
}

#[test]
fn encodes_prompt_notice() {
    let notice = Notice::new(Some(RoomId::new("r1")), "Choose your AFK Status Type:")
        .with_prompt(ScopePrompt {
            reason: Some("lunch".to_string()),
        });
    let line = Outbound::Notice(notice).to_line().unwrap();
    assert_eq!(
        line,
        r#"{"type":"notice","room":"r1","body":"Choose your AFK Status Type:","prompt":{"reason":"lunch"}}"#
    );
}
