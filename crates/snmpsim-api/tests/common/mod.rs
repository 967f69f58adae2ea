#![allow(clippy::unwrap_used, dead_code)]
// In-memory stand-in for the simulator management API, plus a per-test
// fixture context built on top of it.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use percent_encoding::percent_decode_str;
use serde_json::{Map, Value, json};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use snmpsim_api::{
    Agent, Endpoint, Engine, Error, Filter, Lab, MGMT_PREFIX, ManagementClient, NewUser, Tag,
    User, has_tag,
};

pub const TEST_TAG: &str = "snmpsim-rs-test";

const KINDS: [&str; 6] = ["labs", "agents", "engines", "endpoints", "users", "tags"];

// ── Fake simulator ──────────────────────────────────────────────────

type Node = (&'static str, i64);

#[derive(Default)]
struct State {
    next_id: i64,
    objects: BTreeMap<&'static str, BTreeMap<i64, Map<String, Value>>>,
    /// Undirected links, stored with the smaller node first.
    links: BTreeSet<(Node, Node)>,
    recordings: BTreeMap<String, String>,
}

fn kind(segment: &str) -> Option<&'static str> {
    KINDS.iter().copied().find(|k| *k == segment)
}

/// Relationship sub-path segment (`agent`, `tag`, ...) to its collection.
fn singular_kind(segment: &str) -> Option<&'static str> {
    KINDS
        .iter()
        .copied()
        .find(|k| k.strip_suffix('s') == Some(segment))
}

fn edge(a: Node, b: Node) -> (Node, Node) {
    if a <= b { (a, b) } else { (b, a) }
}

fn error(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({"message": message, "status": status}))
}

fn matches_filter(object: &Map<String, Value>, filter: &[(String, String)]) -> bool {
    filter.iter().all(|(key, want)| match object.get(key) {
        Some(Value::String(s)) => s == want,
        Some(Value::Number(n)) => n.to_string() == *want,
        _ => false,
    })
}

impl State {
    fn exists(&self, node: Node) -> bool {
        self.objects
            .get(node.0)
            .is_some_and(|objects| objects.contains_key(&node.1))
    }

    fn neighbours(&self, node: Node) -> Vec<Node> {
        self.links
            .iter()
            .filter_map(|&(a, b)| {
                if a == node {
                    Some(b)
                } else if b == node {
                    Some(a)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Object with its related objects nested one level deep.
    fn render(&self, node: Node) -> Value {
        let mut out = self.objects[node.0][&node.1].clone();
        let neighbours = self.neighbours(node);
        for other in KINDS {
            if other == node.0 {
                continue;
            }
            let nested: Vec<Value> = neighbours
                .iter()
                .filter(|n| n.0 == other)
                .map(|n| Value::Object(self.objects[n.0][&n.1].clone()))
                .collect();
            out.insert(other.to_owned(), Value::Array(nested));
        }
        Value::Object(out)
    }

    fn create(&mut self, kind: &'static str, body: &[u8]) -> Result<Node, ResponseTemplate> {
        let Ok(Value::Object(mut fields)) = serde_json::from_slice::<Value>(body) else {
            return Err(error(400, "malformed body"));
        };
        let name = fields.get("name").and_then(Value::as_str).unwrap_or("");
        if name.is_empty() {
            return Err(error(400, "name is required"));
        }
        let duplicate = self.objects.get(kind).is_some_and(|objects| {
            objects
                .values()
                .any(|o| o.get("name").and_then(Value::as_str) == Some(name))
        });
        if duplicate {
            return Err(error(400, "object with this name already exists"));
        }
        self.next_id += 1;
        let id = self.next_id;
        fields.insert("id".into(), json!(id));
        if kind == "labs" {
            fields.insert("power".into(), json!("off"));
        }
        self.objects.entry(kind).or_default().insert(id, fields);
        Ok((kind, id))
    }

    fn delete(&mut self, node: Node) {
        if let Some(objects) = self.objects.get_mut(node.0) {
            objects.remove(&node.1);
        }
        self.links.retain(|&(a, b)| a != node && b != node);
    }

    fn handle(
        &mut self,
        method: &str,
        segments: &[String],
        query: &[(String, String)],
        body: &[u8],
    ) -> ResponseTemplate {
        let segs: Vec<&str> = segments.iter().map(String::as_str).collect();
        match (method, segs.as_slice()) {
            ("GET", ["recordings"]) => {
                let list: Vec<Value> = self
                    .recordings
                    .keys()
                    .enumerate()
                    .map(|(i, path)| {
                        let name = path.rsplit('/').next().unwrap_or(path);
                        json!({"id": i + 1, "name": name, "path": path})
                    })
                    .collect();
                ResponseTemplate::new(200).set_body_json(list)
            }
            (_, ["recordings", rest @ ..]) => {
                let path = rest.join("/");
                match method {
                    "GET" => match self.recordings.get(&path) {
                        Some(contents) => {
                            ResponseTemplate::new(200).set_body_string(contents.clone())
                        }
                        None => error(404, "no such record file"),
                    },
                    "POST" => {
                        let contents = String::from_utf8_lossy(body).into_owned();
                        self.recordings.insert(path, contents);
                        ResponseTemplate::new(204)
                    }
                    "DELETE" => match self.recordings.remove(&path) {
                        Some(_) => ResponseTemplate::new(204),
                        None => error(404, "no such record file"),
                    },
                    _ => error(405, "method not allowed"),
                }
            }
            ("GET", [k]) => {
                let Some(k) = kind(k) else {
                    return error(404, "no such resource");
                };
                let list: Vec<Value> = self
                    .objects
                    .get(k)
                    .map(|objects| {
                        objects
                            .iter()
                            .filter(|(_, o)| matches_filter(o, query))
                            .map(|(id, _)| self.render((k, *id)))
                            .collect()
                    })
                    .unwrap_or_default();
                ResponseTemplate::new(200).set_body_json(list)
            }
            ("POST", [k]) => {
                let Some(k) = kind(k) else {
                    return error(404, "no such resource");
                };
                match self.create(k, body) {
                    Ok(node) => ResponseTemplate::new(201).set_body_json(self.render(node)),
                    Err(resp) => resp,
                }
            }
            ("POST", ["tags", tag_id, k]) => {
                let (Ok(tag_id), Some(k)) = (tag_id.parse::<i64>(), kind(k)) else {
                    return error(404, "no such resource");
                };
                if !self.exists(("tags", tag_id)) {
                    return error(404, "no such tag");
                }
                match self.create(k, body) {
                    Ok(node) => {
                        self.links.insert(edge(node, ("tags", tag_id)));
                        ResponseTemplate::new(201).set_body_json(self.render(node))
                    }
                    Err(resp) => resp,
                }
            }
            ("DELETE", ["tags", tag_id, "objects"]) => {
                let Ok(tag_id) = tag_id.parse::<i64>() else {
                    return error(404, "no such tag");
                };
                let tag = ("tags", tag_id);
                if !self.exists(tag) {
                    return error(404, "no such tag");
                }
                let snapshot = self.render(tag);
                for node in self.neighbours(tag) {
                    self.delete(node);
                }
                ResponseTemplate::new(200).set_body_json(snapshot)
            }
            (_, [k, id]) => {
                let (Some(k), Ok(id)) = (kind(k), id.parse::<i64>()) else {
                    return error(404, "no such resource");
                };
                if !self.exists((k, id)) {
                    return error(404, "object not found");
                }
                match method {
                    "GET" => ResponseTemplate::new(200).set_body_json(self.render((k, id))),
                    "DELETE" => {
                        self.delete((k, id));
                        ResponseTemplate::new(204)
                    }
                    _ => error(405, "method not allowed"),
                }
            }
            ("PUT", ["labs", id, "power", state @ ("on" | "off")]) => {
                let Ok(id) = id.parse::<i64>() else {
                    return error(404, "no such lab");
                };
                match self.objects.get_mut("labs").and_then(|labs| labs.get_mut(&id)) {
                    Some(lab) => {
                        lab.insert("power".into(), json!(state));
                        ResponseTemplate::new(200).set_body_json(self.render(("labs", id)))
                    }
                    None => error(404, "no such lab"),
                }
            }
            (_, [k, id, sub, sub_id]) => {
                let parsed = (
                    kind(k),
                    id.parse::<i64>(),
                    singular_kind(sub),
                    sub_id.parse::<i64>(),
                );
                let (Some(k), Ok(id), Some(sub), Ok(sub_id)) = parsed else {
                    return error(404, "no such resource");
                };
                self.associate(method, (k, id), (sub, sub_id))
            }
            _ => error(404, "no such resource"),
        }
    }

    fn associate(&mut self, method: &str, parent: Node, child: Node) -> ResponseTemplate {
        let link = edge(parent, child);
        match method {
            "PUT" => match (self.exists(parent), self.exists(child)) {
                (false, false) => error(404, "object not found"),
                (true, false) | (false, true) => error(400, "invalid relationship"),
                (true, true) if self.links.contains(&link) => {
                    error(400, "relationship already exists")
                }
                (true, true) => {
                    self.links.insert(link);
                    ResponseTemplate::new(200).set_body_json(self.render(parent))
                }
            },
            "DELETE" => {
                if self.links.remove(&link) {
                    ResponseTemplate::new(204)
                } else {
                    error(404, "relationship not found")
                }
            }
            _ => error(405, "method not allowed"),
        }
    }
}

/// `wiremock` responder that serves the management API from shared
/// in-memory state.
#[derive(Clone, Default)]
pub struct FakeSimulator {
    state: Arc<Mutex<State>>,
}

impl Respond for FakeSimulator {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let prefix = format!("/{MGMT_PREFIX}");
        let Some(rest) = request.url.path().strip_prefix(&prefix) else {
            return error(404, "unknown api");
        };
        let segments: Vec<String> = rest
            .split('/')
            .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
            .collect();
        let query: Vec<(String, String)> = request.url.query_pairs().into_owned().collect();
        self.state.lock().unwrap().handle(
            request.method.as_str(),
            &segments,
            &query,
            &request.body,
        )
    }
}

// ── Test context ────────────────────────────────────────────────────

/// Everything a scenario test needs: a running fake, a client pointed at
/// it, and the test tag every fixture is created under.
pub struct TestContext {
    pub server: MockServer,
    pub client: ManagementClient,
    pub tag: Tag,
}

impl TestContext {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(FakeSimulator::default())
            .mount(&server)
            .await;
        let client = ManagementClient::new(&server.uri()).unwrap();
        let tag = bootstrap_tag(&client).await;
        Self {
            server,
            client,
            tag,
        }
    }

    pub async fn create_lab(&self, name: &str) -> Lab {
        let lab = self
            .client
            .create_lab_with_tag(name, self.tag.id)
            .await
            .unwrap();
        assert_eq!(lab.name, name);
        assert!(has_tag(&lab.tags, self.tag.id));
        let labs = self.client.get_labs(None).await.unwrap();
        assert!(labs.iter().any(|l| l.id == lab.id), "lab {name} not listed");
        lab
    }

    pub async fn create_agent(&self, name: &str, data_dir: &str) -> Agent {
        let agent = self
            .client
            .create_agent_with_tag(name, Some(data_dir), self.tag.id)
            .await
            .unwrap();
        assert_eq!(agent.data_dir, data_dir);
        let agents = self.client.get_agents(None).await.unwrap();
        assert!(agents.iter().any(|a| a.id == agent.id), "agent {name} not listed");
        agent
    }

    pub async fn create_engine(&self, name: &str, engine_id: &str) -> Engine {
        let engine = self
            .client
            .create_engine_with_tag(name, Some(engine_id), self.tag.id)
            .await
            .unwrap();
        assert_eq!(engine.engine_id, engine_id);
        let engines = self.client.get_engines(None).await.unwrap();
        assert!(engines.iter().any(|e| e.id == engine.id), "engine {name} not listed");
        engine
    }

    pub async fn create_endpoint(&self, name: &str, address: &str) -> Endpoint {
        let endpoint = self
            .client
            .create_endpoint_with_tag(name, address, None, self.tag.id)
            .await
            .unwrap();
        assert_eq!(endpoint.protocol, "udpv4");
        let endpoints = self.client.get_endpoints(None).await.unwrap();
        assert!(endpoints.iter().any(|e| e.id == endpoint.id));
        endpoint
    }

    pub async fn create_user(&self, user: &NewUser) -> User {
        let created = self
            .client
            .create_user_with_tag(user, self.tag.id)
            .await
            .unwrap();
        assert_eq!(created.user, user.user);
        let users = self.client.get_users(None).await.unwrap();
        assert!(users.iter().any(|u| u.id == created.id));
        created
    }

    pub async fn add_engine_to_agent(&self, agent_id: i64, engine_id: i64) {
        self.client
            .add_engine_to_agent(agent_id, engine_id)
            .await
            .unwrap();
        let agent = self.client.get_agent(agent_id).await.unwrap();
        assert!(agent.has_engine(engine_id));
    }

    pub async fn remove_engine_from_agent(&self, agent_id: i64, engine_id: i64) {
        self.client
            .remove_engine_from_agent(agent_id, engine_id)
            .await
            .unwrap();
        let agent = self.client.get_agent(agent_id).await.unwrap();
        assert!(!agent.has_engine(engine_id));
    }

    pub async fn add_agent_to_lab(&self, lab_id: i64, agent_id: i64) {
        self.client.add_agent_to_lab(lab_id, agent_id).await.unwrap();
        let lab = self.client.get_lab(lab_id).await.unwrap();
        assert!(lab.has_agent(agent_id));
    }

    pub async fn remove_agent_from_lab(&self, lab_id: i64, agent_id: i64) {
        self.client
            .remove_agent_from_lab(lab_id, agent_id)
            .await
            .unwrap();
        let lab = self.client.get_lab(lab_id).await.unwrap();
        assert!(!lab.has_agent(agent_id));
    }
}

/// Find the test tag by name: purge what it labels if it exists, create
/// it if not. More than one match means the server is in a state the
/// tests cannot reason about.
pub async fn bootstrap_tag(client: &ManagementClient) -> Tag {
    let filter = Filter::new().with("name", TEST_TAG);
    let mut tags = client.get_tags(Some(&filter)).await.unwrap();
    match tags.len() {
        0 => client
            .create_tag(TEST_TAG, "fixtures created by the snmpsim-api test suite")
            .await
            .unwrap(),
        1 => {
            let tag = tags.remove(0);
            client.delete_all_objects_with_tag(tag.id).await.unwrap();
            client.get_tag(tag.id).await.unwrap()
        }
        n => panic!("found {n} tags named {TEST_TAG}"),
    }
}

/// Assert `result` failed with the given HTTP status.
#[track_caller]
pub fn assert_status<T: std::fmt::Debug>(result: Result<T, Error>, expected: u16) {
    match result {
        Err(err) => assert_eq!(err.status_code(), Some(expected), "unexpected error: {err}"),
        Ok(value) => panic!("expected status {expected}, got Ok({value:?})"),
    }
}
