//! Builders for interactions and messages, and the [`Pact`] that collects them.
//!
//! Every part of an interaction (path, query values, headers, body) is a
//! [`Template`]. Adding an interaction validates and resolves each part for
//! the pact's specification version, then records the result in the
//! contract.

use crate::contract::{
    CategorizedGenerators, CategorizedRules, Contract, ContractWriter, Interaction, Message,
    PartRules, ProviderState, Query, Request, Response,
};
use crate::config::{PactConfig, QueryStringStyle};
use crate::resolver::{Resolution, resolve};
use crate::rules::{MatchingRule, RuleSet};
use crate::{PactError, PactResult, SpecificationVersion, Template, path};
use pact_common::is_json_formatted_object_bytes;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::{debug, warn};
use url::form_urlencoded;

const CONTENT_TYPE: &str = "Content-Type";
const JSON_CONTENT_TYPE: &str = "application/json";

/// An interaction or message body.
#[derive(Debug, Clone)]
enum Body {
    Json(Template),
    Raw { content_type: String, bytes: Vec<u8> },
}

impl Body {
    fn raw(content_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        if is_json_formatted_object_bytes(&bytes) {
            warn!("raw body looks like a JSON object, use a JSON body to get matching rules");
        }
        Self::Raw {
            content_type: content_type.into(),
            bytes,
        }
    }

    fn content_type(&self) -> &str {
        match self {
            Self::Json(_) => JSON_CONTENT_TYPE,
            Self::Raw { content_type, .. } => content_type,
        }
    }
}

/// Headers and body shared by requests and responses.
#[derive(Debug, Clone, Default)]
struct Payload {
    headers: BTreeMap<String, Template>,
    body: Option<Body>,
}

impl Payload {
    fn header(&mut self, name: impl Into<String>, value: impl Into<Template>) {
        self.headers.insert(name.into(), value.into());
    }

    fn set_body(&mut self, body: Body) {
        if !self
            .headers
            .keys()
            .any(|name| name.eq_ignore_ascii_case(CONTENT_TYPE))
        {
            self.header(CONTENT_TYPE, body.content_type());
        }
        self.body = Some(body);
    }
}

/// Describes the expected request of an interaction.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: String,
    path: Template,
    query: BTreeMap<String, Vec<Template>>,
    payload: Payload,
}

impl RequestBuilder {
    /// A request for `path`, which may be a matcher resolving to a string.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<Template>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            query: BTreeMap::new(),
            payload: Payload::default(),
        }
    }

    /// Add a value for query parameter `name`; repeat for several values.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<Template>) -> Self {
        self.query.entry(name.into()).or_default().push(value.into());
        self
    }

    /// Set header `name`.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<Template>) -> Self {
        self.payload.header(name, value);
        self
    }

    /// Set a JSON body, adding a JSON `Content-Type` unless one is set.
    #[must_use]
    pub fn json_body(mut self, body: impl Into<Template>) -> Self {
        self.payload.set_body(Body::Json(body.into()));
        self
    }

    /// Set a raw body of `content_type`. Raw bodies carry no matching rules.
    #[must_use]
    pub fn body(mut self, content_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.payload.set_body(Body::raw(content_type, bytes));
        self
    }
}

/// Describes the expected response of an interaction.
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    status: u16,
    payload: Payload,
}

impl ResponseBuilder {
    /// A response with `status`.
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            payload: Payload::default(),
        }
    }

    /// Set header `name`.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<Template>) -> Self {
        self.payload.header(name, value);
        self
    }

    /// Set a JSON body, adding a JSON `Content-Type` unless one is set.
    #[must_use]
    pub fn json_body(mut self, body: impl Into<Template>) -> Self {
        self.payload.set_body(Body::Json(body.into()));
        self
    }

    /// Set a raw body of `content_type`.
    #[must_use]
    pub fn body(mut self, content_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.payload.set_body(Body::raw(content_type, bytes));
        self
    }
}

/// Describes one HTTP interaction.
#[derive(Debug, Clone)]
pub struct InteractionBuilder {
    description: String,
    states: Vec<ProviderState>,
    request: Option<RequestBuilder>,
    response: Option<ResponseBuilder>,
}

impl InteractionBuilder {
    /// An interaction named `description`.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            states: Vec::new(),
            request: None,
            response: None,
        }
    }

    /// Require provider state `state`.
    #[must_use]
    pub fn given(mut self, state: impl Into<String>) -> Self {
        self.states.push(ProviderState::new(state));
        self
    }

    /// Require provider state `state` with parameters.
    ///
    /// Parameters are dropped from v2 contracts.
    #[must_use]
    pub fn given_with_params<K, V, I>(mut self, state: impl Into<String>, params: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.states.push(ProviderState {
            name: state.into(),
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        });
        self
    }

    /// Set the expected request.
    #[must_use]
    pub fn request(mut self, request: RequestBuilder) -> Self {
        self.request = Some(request);
        self
    }

    /// Set the expected response.
    #[must_use]
    pub fn response(mut self, response: ResponseBuilder) -> Self {
        self.response = Some(response);
        self
    }
}

/// Describes one asynchronous message.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    description: String,
    states: Vec<ProviderState>,
    contents: Template,
    metadata: BTreeMap<String, Value>,
}

impl MessageBuilder {
    /// A message named `description` with empty JSON contents.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            states: Vec::new(),
            contents: Template::null(),
            metadata: BTreeMap::new(),
        }
    }

    /// Require provider state `state`.
    #[must_use]
    pub fn given(mut self, state: impl Into<String>) -> Self {
        self.states.push(ProviderState::new(state));
        self
    }

    /// Set the message contents.
    #[must_use]
    pub fn with_content(mut self, contents: impl Into<Template>) -> Self {
        self.contents = contents.into();
        self
    }

    /// Add a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Collects resolved interactions and messages into a [`Contract`].
#[derive(Debug, Clone)]
pub struct Pact {
    config: PactConfig,
    contract: Contract,
}

impl Pact {
    /// Create an empty pact.
    #[must_use]
    pub fn new(config: PactConfig) -> Self {
        let contract = Contract::new(&config.consumer, &config.provider, config.specification);
        Self { config, contract }
    }

    /// The pact's configuration.
    #[must_use]
    pub const fn config(&self) -> &PactConfig {
        &self.config
    }

    /// The contract built so far.
    #[must_use]
    pub const fn contract(&self) -> &Contract {
        &self.contract
    }

    /// Validate, resolve and record an interaction.
    ///
    /// # Errors
    ///
    /// [`PactError::SpecificationMismatch`] if any part uses matchers newer
    /// than the pact's version, and [`PactError::InvalidPart`] if the request
    /// or response is missing or a path, header or query value does not
    /// resolve to a string. Nothing is recorded on error.
    pub fn interaction(&mut self, builder: InteractionBuilder) -> PactResult<&Interaction> {
        let version = self.config.specification;
        debug!(description = %builder.description, %version, "adding interaction");

        let request = builder
            .request
            .ok_or_else(|| PactError::invalid_part("interaction", "missing request"))?;
        let response = builder
            .response
            .ok_or_else(|| PactError::invalid_part("interaction", "missing response"))?;

        let (provider_state, provider_states) = split_states(version, builder.states);
        let interaction = Interaction {
            description: builder.description,
            provider_state,
            provider_states,
            request: build_request(version, self.config.query_string_style, &request)?,
            response: build_response(version, &response)?,
        };

        self.contract.interactions.push(interaction);
        Ok(&self.contract.interactions[self.contract.interactions.len() - 1])
    }

    /// Validate, resolve and record a message.
    ///
    /// # Errors
    ///
    /// [`PactError::InvalidPart`] for a v2 pact, which cannot hold messages,
    /// and [`PactError::SpecificationMismatch`] as for [`Pact::interaction`].
    pub fn message(&mut self, builder: MessageBuilder) -> PactResult<&Message> {
        let version = self.config.specification;
        if !version.uses_rule_sets() {
            return Err(PactError::invalid_part(
                "message",
                format!("messages need specification {} or later", SpecificationVersion::V3),
            ));
        }
        debug!(description = %builder.description, %version, "adding message");

        let mut part = PartBuilder::new(version);
        let contents = part.body(&builder.contents)?;
        let (matching_rules, generators) = part.finish();

        let mut metadata = builder.metadata;
        metadata
            .entry("contentType".to_string())
            .or_insert_with(|| Value::from(JSON_CONTENT_TYPE));

        self.contract.messages.push(Message {
            description: builder.description,
            provider_states: builder.states,
            contents,
            matching_rules,
            generators,
            metadata,
        });
        Ok(&self.contract.messages[self.contract.messages.len() - 1])
    }

    /// Hand the contract to `writer`.
    ///
    /// # Errors
    ///
    /// Whatever `writer` reports.
    pub fn write(&self, writer: &impl ContractWriter) -> PactResult<()> {
        debug!(
            consumer = %self.config.consumer,
            provider = %self.config.provider,
            interactions = self.contract.interactions.len(),
            messages = self.contract.messages.len(),
            "writing contract"
        );
        writer.write_contract(&self.contract)
    }
}

fn split_states(
    version: SpecificationVersion,
    states: Vec<ProviderState>,
) -> (Option<String>, Vec<ProviderState>) {
    if version.uses_rule_sets() {
        return (None, states);
    }

    if states.len() > 1 {
        warn!(
            count = states.len(),
            "v2 contracts hold a single provider state, keeping the first"
        );
    }
    if states.iter().any(|state| !state.params.is_empty()) {
        warn!("v2 contracts carry no provider state parameters, dropping them");
    }
    (states.into_iter().next().map(|state| state.name), Vec::new())
}

fn build_request(
    version: SpecificationVersion,
    style: QueryStringStyle,
    request: &RequestBuilder,
) -> PactResult<Request> {
    let mut part = PartBuilder::new(version);
    let path = part.path(&request.path)?;

    let mut query = BTreeMap::new();
    for (name, values) in &request.query {
        query.insert(name.clone(), part.query(name, values)?);
    }

    let headers = part.headers(&request.payload.headers)?;
    let body = part.payload_body(request.payload.body.as_ref())?;
    let (matching_rules, generators) = part.finish();

    Ok(Request {
        method: request.method.to_uppercase(),
        path,
        query: render_query(version, style, query),
        headers,
        body,
        matching_rules,
        generators,
    })
}

fn build_response(version: SpecificationVersion, response: &ResponseBuilder) -> PactResult<Response> {
    let mut part = PartBuilder::new(version);
    let headers = part.headers(&response.payload.headers)?;
    let body = part.payload_body(response.payload.body.as_ref())?;
    let (matching_rules, generators) = part.finish();

    Ok(Response {
        status: response.status,
        headers,
        body,
        matching_rules,
        generators,
    })
}

fn render_query(
    version: SpecificationVersion,
    style: QueryStringStyle,
    query: BTreeMap<String, Vec<String>>,
) -> Option<Query> {
    if query.is_empty() {
        return None;
    }
    if version.uses_rule_sets() {
        return Some(Query::Map(query));
    }
    Some(Query::String(query_string(style, &query)))
}

/// Render a v2 query string, form-urlencoding names and values.
#[must_use]
pub fn query_string(style: QueryStringStyle, query: &BTreeMap<String, Vec<String>>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, values) in query {
        let bracket = match style {
            QueryStringStyle::Default => false,
            QueryStringStyle::Array => values.len() > 1,
            QueryStringStyle::AlwaysArray => true,
        };
        let key: Cow<'_, str> = if bracket {
            Cow::Owned(format!("{name}[]"))
        } else {
            Cow::Borrowed(name)
        };
        for value in values {
            serializer.append_pair(&key, value);
        }
    }
    serializer.finish()
}

/// Accumulates the rules and generators of one request, response or message.
///
/// v2 rules are flat and rooted at `$.path`, `$.query`, `$.headers` and
/// `$.body`. v3 rules are grouped by category, body paths rooted at `$`.
struct PartBuilder {
    version: SpecificationVersion,
    flat: BTreeMap<String, MatchingRule>,
    categorized: CategorizedRules,
    generators: CategorizedGenerators,
}

impl PartBuilder {
    fn new(version: SpecificationVersion) -> Self {
        Self {
            version,
            flat: BTreeMap::new(),
            categorized: CategorizedRules::default(),
            generators: CategorizedGenerators::default(),
        }
    }

    const fn is_flat(&self) -> bool {
        !self.version.uses_rule_sets()
    }

    /// Resolve a v2 part at `v2_root`, or a v3 part at `$`.
    fn resolve(&mut self, v2_root: &str, template: &Template) -> PactResult<Resolution> {
        if self.is_flat() {
            let resolution = resolve(self.version, v2_root, template)?;
            self.flat.extend(
                resolution
                    .rules
                    .iter()
                    .map(|(path, rule)| (path.clone(), rule.clone())),
            );
            Ok(resolution)
        } else {
            resolve(self.version, path::ROOT, template)
        }
    }

    fn path(&mut self, template: &Template) -> PactResult<String> {
        let resolution = self.resolve("$.path", template)?;
        if !self.is_flat() {
            self.categorized.path = root_rule_set(&resolution);
            self.generators.path = resolution.generators.get(path::ROOT).cloned();
        }
        scalar_string("request path", resolution.body)
    }

    fn query(&mut self, name: &str, values: &[Template]) -> PactResult<Vec<String>> {
        let param = path::field("$.query", name);
        let mut rendered = Vec::with_capacity(values.len());

        for (i, value) in values.iter().enumerate() {
            let resolution = self.resolve(&path::index(&param, i), value)?;
            if !self.is_flat() {
                if let Some(rules) = root_rule_set(&resolution) {
                    self.categorized.query.entry(name.to_string()).or_insert(rules);
                }
                if let Some(generator) = resolution.generators.get(path::ROOT) {
                    self.generators
                        .query
                        .entry(name.to_string())
                        .or_insert_with(|| generator.clone());
                }
            }
            rendered.push(scalar_string(&format!("query parameter {name}"), resolution.body)?);
        }
        Ok(rendered)
    }

    fn headers(
        &mut self,
        headers: &BTreeMap<String, Template>,
    ) -> PactResult<BTreeMap<String, String>> {
        let mut rendered = BTreeMap::new();
        for (name, value) in headers {
            let resolution = self.resolve(&path::field("$.headers", name), value)?;
            if !self.is_flat() {
                if let Some(rules) = root_rule_set(&resolution) {
                    self.categorized.header.insert(name.clone(), rules);
                }
                if let Some(generator) = resolution.generators.get(path::ROOT) {
                    self.generators.header.insert(name.clone(), generator.clone());
                }
            }
            rendered.insert(
                name.clone(),
                scalar_string(&format!("header {name}"), resolution.body)?,
            );
        }
        Ok(rendered)
    }

    fn body(&mut self, template: &Template) -> PactResult<Value> {
        let resolution = self.resolve("$.body", template)?;
        if !self.is_flat() {
            self.categorized.body = resolution.rules.rule_sets();
            self.generators.body = resolution.generators.render();
        }
        Ok(resolution.body)
    }

    fn payload_body(&mut self, body: Option<&Body>) -> PactResult<Option<Value>> {
        match body {
            None => Ok(None),
            Some(Body::Json(template)) => self.body(template).map(Some),
            Some(Body::Raw { bytes, .. }) => {
                let text = String::from_utf8_lossy(bytes);
                if matches!(text, Cow::Owned(_)) {
                    warn!(
                        len = bytes.len(),
                        "raw body is not valid UTF-8, invalid sequences were replaced"
                    );
                }
                Ok(Some(Value::from(text.into_owned())))
            }
        }
    }

    fn finish(self) -> (Option<PartRules>, Option<CategorizedGenerators>) {
        let rules = if self.is_flat() {
            PartRules::Flat(self.flat)
        } else {
            PartRules::Categorized(self.categorized)
        };
        let rules = (!rules.is_empty()).then_some(rules);
        let generators = (!self.generators.is_empty()).then_some(self.generators);
        (rules, generators)
    }
}

fn root_rule_set(resolution: &Resolution) -> Option<RuleSet> {
    resolution
        .rules
        .get(path::ROOT)
        .map(|rule| RuleSet::and(rule.clone()))
}

fn scalar_string(part: &str, value: Value) -> PactResult<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(PactError::invalid_part(
            part,
            format!("expected a string, found {other}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::{each_like, from_provider_state, includes, like, term};
    use serde_json::json;

    fn pact(version: SpecificationVersion) -> Pact {
        Pact::new(PactConfig::new("web-app", "user-service").with_specification(version))
    }

    fn get_user() -> InteractionBuilder {
        InteractionBuilder::new("get a user")
            .given("user 1 exists")
            .request(
                RequestBuilder::new("get", term("/users/1", r"^/users/\d+$"))
                    .query("fields", "name")
                    .query("fields", like("email"))
                    .header("Accept", "application/json"),
            )
            .response(
                ResponseBuilder::new(200).json_body(Template::object([
                    ("id", Template::from(like(1))),
                    ("tags", Template::from(each_like("admin", 2))),
                ])),
            )
    }

    #[test]
    fn test_v2_interaction() {
        let mut pact = pact(SpecificationVersion::V2);
        let interaction = pact.interaction(get_user()).unwrap();

        let value = serde_json::to_value(interaction).unwrap();
        assert_eq!(value["providerState"], json!("user 1 exists"));
        assert!(value.get("providerStates").is_none());
        assert_eq!(value["request"]["method"], json!("GET"));
        assert_eq!(value["request"]["path"], json!("/users/1"));
        assert_eq!(value["request"]["query"], json!("fields=name&fields=email"));
        assert_eq!(
            value["request"]["matchingRules"],
            json!({
                "$.path": {"match": "regex", "regex": r"^/users/\d+$"},
                "$.query.fields[1]": {"match": "type"}
            })
        );
        assert_eq!(
            value["response"]["matchingRules"],
            json!({
                "$.body.id": {"match": "type"},
                "$.body.tags": {"match": "type", "min": 2}
            })
        );
        assert_eq!(value["response"]["body"], json!({"id": 1, "tags": ["admin", "admin"]}));
        assert_eq!(value["response"]["headers"]["Content-Type"], json!("application/json"));
    }

    #[test]
    fn test_v3_interaction() {
        let mut pact = pact(SpecificationVersion::V3);
        let interaction = pact.interaction(get_user()).unwrap();

        let value = serde_json::to_value(interaction).unwrap();
        assert_eq!(value["providerStates"], json!([{"name": "user 1 exists"}]));
        assert_eq!(value["request"]["query"], json!({"fields": ["name", "email"]}));
        assert_eq!(
            value["request"]["matchingRules"]["path"],
            json!({"combine": "AND", "matchers": [{"match": "regex", "regex": r"^/users/\d+$"}]})
        );
        assert_eq!(
            value["request"]["matchingRules"]["query"]["fields"]["matchers"],
            json!([{"match": "type"}])
        );
        assert_eq!(
            value["response"]["matchingRules"]["body"]["$.tags"],
            json!({"combine": "AND", "matchers": [{"match": "type", "min": 2}]})
        );
    }

    #[test]
    fn test_v3_generators() {
        let mut pact = pact(SpecificationVersion::V3);
        let builder = InteractionBuilder::new("fetch by id")
            .given_with_params("user exists", [("id", 7)])
            .request(RequestBuilder::new(
                "GET",
                from_provider_state("/users/${id}", "/users/7"),
            ))
            .response(ResponseBuilder::new(200));

        let interaction = pact.interaction(builder).unwrap();
        let value = serde_json::to_value(interaction).unwrap();
        assert_eq!(value["providerStates"][0]["params"], json!({"id": 7}));
        assert_eq!(
            value["request"]["generators"]["path"],
            json!({"type": "ProviderState", "expression": "/users/${id}"})
        );
        assert!(value["response"].get("matchingRules").is_none());
    }

    #[test]
    fn test_spec_mismatch_records_nothing() {
        let mut pact = pact(SpecificationVersion::V2);
        let builder = InteractionBuilder::new("greet")
            .request(RequestBuilder::new("GET", "/greeting"))
            .response(ResponseBuilder::new(200).json_body(Template::object([(
                "message",
                includes("hello"),
            )])));

        let err = pact.interaction(builder).unwrap_err();
        assert!(err.to_string().contains("include"));
        assert!(pact.contract().interactions.is_empty());
    }

    #[test]
    fn test_missing_parts() {
        let mut pact = pact(SpecificationVersion::V3);
        let err = pact
            .interaction(InteractionBuilder::new("no request"))
            .unwrap_err();
        assert!(matches!(err, PactError::InvalidPart { .. }));
    }

    #[test]
    fn test_path_must_be_a_string() {
        let mut pact = pact(SpecificationVersion::V3);
        let builder = InteractionBuilder::new("bad path")
            .request(RequestBuilder::new("GET", like(json!({"a": 1}))))
            .response(ResponseBuilder::new(200));

        let err = pact.interaction(builder).unwrap_err();
        assert!(err.to_string().contains("request path"));
    }

    #[test]
    fn test_raw_body() {
        let mut pact = pact(SpecificationVersion::V3);
        let builder = InteractionBuilder::new("upload")
            .request(RequestBuilder::new("POST", "/files").body("text/plain", "hello"))
            .response(ResponseBuilder::new(201));

        let interaction = pact.interaction(builder).unwrap();
        assert_eq!(interaction.request.body, Some(json!("hello")));
        assert_eq!(
            interaction.request.headers.get("Content-Type").map(String::as_str),
            Some("text/plain")
        );
        assert!(interaction.request.matching_rules.is_none());
    }

    #[test]
    fn test_explicit_content_type_kept() {
        let request = RequestBuilder::new("POST", "/x")
            .header("content-type", "application/vnd.api+json")
            .json_body(json!({"a": 1}));
        assert_eq!(request.payload.headers.len(), 1);
    }

    #[test]
    fn test_messages() {
        let mut v2 = pact(SpecificationVersion::V2);
        assert!(v2.message(MessageBuilder::new("event")).is_err());

        let mut v3 = pact(SpecificationVersion::V3);
        let message = v3
            .message(
                MessageBuilder::new("user created")
                    .given("a user")
                    .with_content(Template::object([("id", like(5))]))
                    .with_metadata("queue", "users"),
            )
            .unwrap();

        assert_eq!(message.contents, json!({"id": 5}));
        assert_eq!(message.metadata["contentType"], json!("application/json"));
        let Some(PartRules::Categorized(rules)) = &message.matching_rules else {
            panic!("expected categorized rules");
        };
        assert!(rules.body.contains_key("$.id"));
    }

    #[test]
    fn test_query_string_styles() {
        let query = BTreeMap::from([
            ("a".to_string(), vec!["1".to_string(), "2".to_string()]),
            ("b".to_string(), vec!["3".to_string()]),
        ]);

        assert_eq!(query_string(QueryStringStyle::Default, &query), "a=1&a=2&b=3");
        assert_eq!(
            query_string(QueryStringStyle::Array, &query),
            "a%5B%5D=1&a%5B%5D=2&b=3"
        );
        assert_eq!(
            query_string(QueryStringStyle::AlwaysArray, &query),
            "a%5B%5D=1&a%5B%5D=2&b%5B%5D=3"
        );
    }

    #[test]
    fn test_query_string_is_encoded() {
        let mut pact = pact(SpecificationVersion::V2);
        let builder = InteractionBuilder::new("search")
            .request(RequestBuilder::new("GET", "/search").query("q", "a b&admin=true#x"))
            .response(ResponseBuilder::new(200));

        let interaction = pact.interaction(builder).unwrap();
        let value = serde_json::to_value(interaction).unwrap();
        assert_eq!(value["request"]["query"], json!("q=a+b%26admin%3Dtrue%23x"));
    }

    #[test]
    fn test_v2_numeric_query_and_header_names() {
        let mut pact = pact(SpecificationVersion::V2);
        let builder = InteractionBuilder::new("by year")
            .request(
                RequestBuilder::new("GET", "/stats")
                    .query("2024", like("x"))
                    .header("404", like("y")),
            )
            .response(ResponseBuilder::new(200));

        let interaction = pact.interaction(builder).unwrap();
        let value = serde_json::to_value(interaction).unwrap();
        assert_eq!(
            value["request"]["matchingRules"],
            json!({
                "$.query.2024[0]": {"match": "type"},
                "$.headers.404": {"match": "type"}
            })
        );
    }

    #[test]
    fn test_non_utf8_raw_body_is_replaced() {
        let mut pact = pact(SpecificationVersion::V3);
        let builder = InteractionBuilder::new("upload bytes")
            .request(
                RequestBuilder::new("POST", "/files")
                    .body("application/octet-stream", vec![0x68, 0xff]),
            )
            .response(ResponseBuilder::new(201));

        let interaction = pact.interaction(builder).unwrap();
        assert_eq!(interaction.request.body, Some(json!("h\u{fffd}")));
    }
}
