//! Request-builder bases the generated code delegates to.
//!
//! Each generated builder wraps exactly one of the types here and forwards
//! its strongly-typed binding methods to it. The bases are deliberately
//! thin: they accumulate bound values and produce a [`Request`] on
//! `build()`, nothing more.
//!
//! [`RequestBuilderBase`] holds the state common to every operation
//! (URI template, resource spec, path keys, query parameters, headers,
//! operation name); the per-operation builders add their typed payload
//! fields on top.

use tracing::debug;

use crate::key::CompoundKey;
use crate::request::{Payload, Request};
use crate::spec::{Operation, ResourceSpec};
use crate::value::ParamValue;

/// State common to every request builder.
#[derive(Debug, Clone)]
pub struct RequestBuilderBase<K, V> {
    base_uri_template: String,
    resource_spec: ResourceSpec,
    path_keys: Vec<(String, ParamValue)>,
    query_params: Vec<(String, ParamValue)>,
    headers: Vec<(String, String)>,
    name: Option<String>,
    _marker: std::marker::PhantomData<(K, V)>,
}

impl<K, V> RequestBuilderBase<K, V> {
    /// Creates a base over the resource's URI template and spec.
    pub fn new(base_uri_template: impl Into<String>, resource_spec: ResourceSpec) -> Self {
        Self {
            base_uri_template: base_uri_template.into(),
            resource_spec,
            path_keys: Vec::new(),
            query_params: Vec::new(),
            headers: Vec::new(),
            name: None,
            _marker: std::marker::PhantomData,
        }
    }

    /// Binds a path-template variable.
    pub fn path_key(&mut self, name: &str, value: impl Into<ParamValue>) {
        self.path_keys.push((name.to_string(), value.into()));
    }

    /// Binds a query parameter.
    pub fn param(&mut self, name: &str, value: impl Into<ParamValue>) {
        self.query_params.push((name.to_string(), value.into()));
    }

    /// Adds a request header.
    pub fn header(&mut self, key: &str, value: &str) {
        self.headers.push((key.to_string(), value.to_string()));
    }

    /// Names the finder or action this builder targets.
    pub fn name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    /// The resource spec this builder was created with.
    pub fn resource_spec(&self) -> &ResourceSpec {
        &self.resource_spec
    }

    /// Finalizes into a [`Request`], appending the finder/action name as
    /// its reserved query parameter.
    pub fn finish(mut self, op: Operation, payload: Payload<K, V>) -> Request<K, V> {
        if let Some(name) = self.name.take() {
            match op {
                Operation::Finder => self.query_params.push(("q".to_string(), name.into())),
                Operation::Action => self.query_params.push(("action".to_string(), name.into())),
                _ => {}
            }
        }
        debug!(
            op = %op,
            uri_template = %self.base_uri_template,
            path_keys = self.path_keys.len(),
            query_params = self.query_params.len(),
            "assembled request"
        );
        Request::new(
            op,
            self.base_uri_template,
            self.path_keys,
            self.query_params,
            self.headers,
            payload,
        )
    }
}

// One delegation shim per operation family. Macros could compress these,
// but explicit impls keep the generated code's call targets greppable.

/// Builder for `get` requests.
#[derive(Debug, Clone)]
pub struct GetRequestBuilder<K, V> {
    base: RequestBuilderBase<K, V>,
    id: Option<K>,
}

impl<K, V> GetRequestBuilder<K, V> {
    pub fn new(base_uri_template: impl Into<String>, resource_spec: ResourceSpec) -> Self {
        Self {
            base: RequestBuilderBase::new(base_uri_template, resource_spec),
            id: None,
        }
    }

    /// Binds the entity key.
    pub fn id(mut self, id: K) -> Self {
        self.id = Some(id);
        self
    }

    pub fn path_key(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.path_key(name, value);
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.base.header(key, value);
        self
    }

    /// Binds an optional query parameter.
    pub fn param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.param(name, value);
        self
    }

    /// Binds a required query parameter.
    pub fn req_param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.param(name, value);
        self
    }

    pub fn build(self) -> Request<K, V> {
        let payload = match self.id {
            Some(id) => Payload::Id(id),
            None => Payload::None,
        };
        self.base.finish(Operation::Get, payload)
    }
}

/// Builder for `delete` requests.
#[derive(Debug, Clone)]
pub struct DeleteRequestBuilder<K, V> {
    base: RequestBuilderBase<K, V>,
    id: Option<K>,
}

impl<K, V> DeleteRequestBuilder<K, V> {
    pub fn new(base_uri_template: impl Into<String>, resource_spec: ResourceSpec) -> Self {
        Self {
            base: RequestBuilderBase::new(base_uri_template, resource_spec),
            id: None,
        }
    }

    /// Binds the entity key.
    pub fn id(mut self, id: K) -> Self {
        self.id = Some(id);
        self
    }

    pub fn path_key(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.path_key(name, value);
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.base.header(key, value);
        self
    }

    /// Binds an optional query parameter.
    pub fn param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.param(name, value);
        self
    }

    /// Binds a required query parameter.
    pub fn req_param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.param(name, value);
        self
    }

    pub fn build(self) -> Request<K, V> {
        let payload = match self.id {
            Some(id) => Payload::Id(id),
            None => Payload::None,
        };
        self.base.finish(Operation::Delete, payload)
    }
}

/// Builder for `create` requests.
#[derive(Debug, Clone)]
pub struct CreateRequestBuilder<K, V> {
    base: RequestBuilderBase<K, V>,
    input: Option<V>,
}

impl<K, V> CreateRequestBuilder<K, V> {
    pub fn new(base_uri_template: impl Into<String>, resource_spec: ResourceSpec) -> Self {
        Self {
            base: RequestBuilderBase::new(base_uri_template, resource_spec),
            input: None,
        }
    }

    /// Binds the entity to create.
    pub fn input(mut self, entity: V) -> Self {
        self.input = Some(entity);
        self
    }

    pub fn path_key(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.path_key(name, value);
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.base.header(key, value);
        self
    }

    /// Binds an optional query parameter.
    pub fn param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.param(name, value);
        self
    }

    /// Binds a required query parameter.
    pub fn req_param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.param(name, value);
        self
    }

    pub fn build(self) -> Request<K, V> {
        let payload = match self.input {
            Some(entity) => Payload::Entity(entity),
            None => Payload::None,
        };
        self.base.finish(Operation::Create, payload)
    }
}

/// Builder for `update` requests.
#[derive(Debug, Clone)]
pub struct UpdateRequestBuilder<K, V> {
    base: RequestBuilderBase<K, V>,
    id: Option<K>,
    input: Option<V>,
}

impl<K, V> UpdateRequestBuilder<K, V> {
    pub fn new(base_uri_template: impl Into<String>, resource_spec: ResourceSpec) -> Self {
        Self {
            base: RequestBuilderBase::new(base_uri_template, resource_spec),
            id: None,
            input: None,
        }
    }

    /// Binds the entity key.
    pub fn id(mut self, id: K) -> Self {
        self.id = Some(id);
        self
    }

    /// Binds the replacement entity.
    pub fn input(mut self, entity: V) -> Self {
        self.input = Some(entity);
        self
    }

    pub fn path_key(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.path_key(name, value);
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.base.header(key, value);
        self
    }

    /// Binds an optional query parameter.
    pub fn param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.param(name, value);
        self
    }

    /// Binds a required query parameter.
    pub fn req_param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.param(name, value);
        self
    }

    pub fn build(self) -> Request<K, V> {
        let payload = match (self.id, self.input) {
            (Some(id), Some(entity)) => Payload::IdAndEntity(id, entity),
            (Some(id), None) => Payload::Id(id),
            (None, Some(entity)) => Payload::Entity(entity),
            (None, None) => Payload::None,
        };
        self.base.finish(Operation::Update, payload)
    }
}

/// Builder for `partial_update` requests.
#[derive(Debug, Clone)]
pub struct PartialUpdateRequestBuilder<K, V> {
    base: RequestBuilderBase<K, V>,
    id: Option<K>,
    patch: Option<V>,
}

impl<K, V> PartialUpdateRequestBuilder<K, V> {
    pub fn new(base_uri_template: impl Into<String>, resource_spec: ResourceSpec) -> Self {
        Self {
            base: RequestBuilderBase::new(base_uri_template, resource_spec),
            id: None,
            patch: None,
        }
    }

    /// Binds the entity key.
    pub fn id(mut self, id: K) -> Self {
        self.id = Some(id);
        self
    }

    /// Binds the patch document.
    pub fn input(mut self, patch: V) -> Self {
        self.patch = Some(patch);
        self
    }

    pub fn path_key(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.path_key(name, value);
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.base.header(key, value);
        self
    }

    /// Binds an optional query parameter.
    pub fn param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.param(name, value);
        self
    }

    /// Binds a required query parameter.
    pub fn req_param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.param(name, value);
        self
    }

    pub fn build(self) -> Request<K, V> {
        let payload = match (self.id, self.patch) {
            (Some(id), Some(patch)) => Payload::IdAndEntity(id, patch),
            (Some(id), None) => Payload::Id(id),
            (None, Some(patch)) => Payload::Entity(patch),
            (None, None) => Payload::None,
        };
        self.base.finish(Operation::PartialUpdate, payload)
    }
}

/// Builder for `batch_get` requests.
#[derive(Debug, Clone)]
pub struct BatchGetRequestBuilder<K, V> {
    base: RequestBuilderBase<K, V>,
    ids: Vec<K>,
}

impl<K, V> BatchGetRequestBuilder<K, V> {
    pub fn new(base_uri_template: impl Into<String>, resource_spec: ResourceSpec) -> Self {
        Self {
            base: RequestBuilderBase::new(base_uri_template, resource_spec),
            ids: Vec::new(),
        }
    }

    /// Appends entity keys to fetch.
    pub fn ids(mut self, ids: impl IntoIterator<Item = K>) -> Self {
        self.ids.extend(ids);
        self
    }

    pub fn path_key(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.path_key(name, value);
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.base.header(key, value);
        self
    }

    /// Binds an optional query parameter.
    pub fn param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.param(name, value);
        self
    }

    /// Binds a required query parameter.
    pub fn req_param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.param(name, value);
        self
    }

    pub fn build(self) -> Request<K, V> {
        self.base.finish(Operation::BatchGet, Payload::Ids(self.ids))
    }
}

/// Builder for `batch_create` requests.
#[derive(Debug, Clone)]
pub struct BatchCreateRequestBuilder<K, V> {
    base: RequestBuilderBase<K, V>,
    inputs: Vec<V>,
}

impl<K, V> BatchCreateRequestBuilder<K, V> {
    pub fn new(base_uri_template: impl Into<String>, resource_spec: ResourceSpec) -> Self {
        Self {
            base: RequestBuilderBase::new(base_uri_template, resource_spec),
            inputs: Vec::new(),
        }
    }

    /// Appends entities to create.
    pub fn inputs(mut self, entities: impl IntoIterator<Item = V>) -> Self {
        self.inputs.extend(entities);
        self
    }

    pub fn path_key(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.path_key(name, value);
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.base.header(key, value);
        self
    }

    /// Binds an optional query parameter.
    pub fn param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.param(name, value);
        self
    }

    /// Binds a required query parameter.
    pub fn req_param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.param(name, value);
        self
    }

    pub fn build(self) -> Request<K, V> {
        self.base
            .finish(Operation::BatchCreate, Payload::Entities(self.inputs))
    }
}

/// Builder for `batch_update` requests.
#[derive(Debug, Clone)]
pub struct BatchUpdateRequestBuilder<K, V> {
    base: RequestBuilderBase<K, V>,
    updates: Vec<(K, V)>,
}

impl<K, V> BatchUpdateRequestBuilder<K, V> {
    pub fn new(base_uri_template: impl Into<String>, resource_spec: ResourceSpec) -> Self {
        Self {
            base: RequestBuilderBase::new(base_uri_template, resource_spec),
            updates: Vec::new(),
        }
    }

    /// Appends one keyed replacement.
    pub fn update(mut self, id: K, entity: V) -> Self {
        self.updates.push((id, entity));
        self
    }

    pub fn path_key(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.path_key(name, value);
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.base.header(key, value);
        self
    }

    /// Binds an optional query parameter.
    pub fn param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.param(name, value);
        self
    }

    /// Binds a required query parameter.
    pub fn req_param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.param(name, value);
        self
    }

    pub fn build(self) -> Request<K, V> {
        self.base
            .finish(Operation::BatchUpdate, Payload::Updates(self.updates))
    }
}

/// Builder for `batch_partial_update` requests.
#[derive(Debug, Clone)]
pub struct BatchPartialUpdateRequestBuilder<K, V> {
    base: RequestBuilderBase<K, V>,
    patches: Vec<(K, V)>,
}

impl<K, V> BatchPartialUpdateRequestBuilder<K, V> {
    pub fn new(base_uri_template: impl Into<String>, resource_spec: ResourceSpec) -> Self {
        Self {
            base: RequestBuilderBase::new(base_uri_template, resource_spec),
            patches: Vec::new(),
        }
    }

    /// Appends one keyed patch.
    pub fn patch(mut self, id: K, patch: V) -> Self {
        self.patches.push((id, patch));
        self
    }

    pub fn path_key(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.path_key(name, value);
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.base.header(key, value);
        self
    }

    /// Binds an optional query parameter.
    pub fn param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.param(name, value);
        self
    }

    /// Binds a required query parameter.
    pub fn req_param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.param(name, value);
        self
    }

    pub fn build(self) -> Request<K, V> {
        self.base
            .finish(Operation::BatchPartialUpdate, Payload::Updates(self.patches))
    }
}

/// Builder for `batch_delete` requests.
#[derive(Debug, Clone)]
pub struct BatchDeleteRequestBuilder<K, V> {
    base: RequestBuilderBase<K, V>,
    ids: Vec<K>,
}

impl<K, V> BatchDeleteRequestBuilder<K, V> {
    pub fn new(base_uri_template: impl Into<String>, resource_spec: ResourceSpec) -> Self {
        Self {
            base: RequestBuilderBase::new(base_uri_template, resource_spec),
            ids: Vec::new(),
        }
    }

    /// Appends entity keys to delete.
    pub fn ids(mut self, ids: impl IntoIterator<Item = K>) -> Self {
        self.ids.extend(ids);
        self
    }

    pub fn path_key(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.path_key(name, value);
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.base.header(key, value);
        self
    }

    /// Binds an optional query parameter.
    pub fn param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.param(name, value);
        self
    }

    /// Binds a required query parameter.
    pub fn req_param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.param(name, value);
        self
    }

    pub fn build(self) -> Request<K, V> {
        self.base
            .finish(Operation::BatchDelete, Payload::Ids(self.ids))
    }
}

/// Builder for finder requests.
#[derive(Debug, Clone)]
pub struct FindRequestBuilder<K, V> {
    base: RequestBuilderBase<K, V>,
    assoc: CompoundKey,
}

impl<K, V> FindRequestBuilder<K, V> {
    pub fn new(base_uri_template: impl Into<String>, resource_spec: ResourceSpec) -> Self {
        Self {
            base: RequestBuilderBase::new(base_uri_template, resource_spec),
            assoc: CompoundKey::new(),
        }
    }

    /// Names the finder; rendered as the reserved `q` query parameter.
    pub fn name(mut self, name: &str) -> Self {
        self.base.name(name);
        self
    }

    /// Binds an optional query parameter.
    pub fn param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.param(name, value);
        self
    }

    /// Binds a required query parameter.
    pub fn req_param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.param(name, value);
        self
    }

    /// Binds one association-key component the finder is scoped to.
    pub fn assoc_key(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.assoc = self.assoc.append(name, value);
        self
    }

    pub fn path_key(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.path_key(name, value);
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.base.header(key, value);
        self
    }

    /// Bound association-key components.
    pub fn assoc(&self) -> &CompoundKey {
        &self.assoc
    }

    pub fn build(mut self) -> Request<K, V> {
        for (name, value) in self.assoc.iter() {
            self.base.param(name, value.clone());
        }
        self.base.finish(Operation::Finder, Payload::None)
    }
}

/// Builder for action requests. `R` is the action's return type.
#[derive(Debug, Clone)]
pub struct ActionRequestBuilder<K, R> {
    base: RequestBuilderBase<K, R>,
    id: Option<K>,
    params: Vec<(String, ParamValue)>,
}

impl<K, R> ActionRequestBuilder<K, R> {
    pub fn new(base_uri_template: impl Into<String>, resource_spec: ResourceSpec) -> Self {
        Self {
            base: RequestBuilderBase::new(base_uri_template, resource_spec),
            id: None,
            params: Vec::new(),
        }
    }

    /// Names the action; rendered as the reserved `action` query parameter.
    pub fn name(mut self, name: &str) -> Self {
        self.base.name(name);
        self
    }

    /// Binds the entity key for entity-scoped actions.
    pub fn id(mut self, id: K) -> Self {
        self.id = Some(id);
        self
    }

    /// Binds one named action argument.
    pub fn param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.params.push((name.to_string(), value.into()));
        self
    }

    pub fn path_key(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.base.path_key(name, value);
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.base.header(key, value);
        self
    }

    pub fn build(self) -> Request<K, R> {
        self.base.finish(
            Operation::Action,
            Payload::ActionParams {
                id: self.id,
                params: self.params,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Payload;

    fn spec() -> ResourceSpec {
        ResourceSpec::new([Operation::Get, Operation::Create, Operation::Finder])
    }

    #[test]
    fn get_builder_carries_id_payload() {
        let request = GetRequestBuilder::<i64, ()>::new("widgets", spec())
            .id(7)
            .build();

        assert_eq!(request.op(), Operation::Get);
        assert_eq!(request.payload(), &Payload::Id(7));
    }

    #[test]
    fn create_builder_carries_entity_payload() {
        let request = CreateRequestBuilder::<i64, &str>::new("widgets", spec())
            .input("sprocket")
            .build();

        assert_eq!(request.payload(), &Payload::Entity("sprocket"));
    }

    #[test]
    fn finder_name_becomes_q_param() {
        let request = FindRequestBuilder::<i64, ()>::new("widgets", spec())
            .name("byOwner")
            .req_param("owner", "alice")
            .build();

        assert_eq!(request.op(), Operation::Finder);
        assert_eq!(request.uri(), "widgets?owner=alice&q=byOwner");
    }

    #[test]
    fn finder_assoc_keys_bind_as_params() {
        let request = FindRequestBuilder::<CompoundKey, ()>::new("memberships", spec())
            .name("byMember")
            .assoc_key("memberId", 17i64)
            .build();

        assert!(request
            .query_params()
            .iter()
            .any(|(name, value)| name == "memberId" && value == &ParamValue::Int(17)));
    }

    #[test]
    fn action_name_and_params() {
        let request = ActionRequestBuilder::<i64, bool>::new("widgets", spec())
            .name("promote")
            .id(7)
            .param("tier", 2i64)
            .build();

        assert_eq!(request.op(), Operation::Action);
        match request.payload() {
            Payload::ActionParams { id, params } => {
                assert_eq!(*id, Some(7));
                assert_eq!(params.len(), 1);
            }
            other => panic!("Expected action payload, got: {:?}", other),
        }
        assert_eq!(request.uri(), "widgets?action=promote");
    }

    #[test]
    fn batch_update_accumulates_pairs() {
        let request = BatchUpdateRequestBuilder::<i64, &str>::new("widgets", spec())
            .update(1, "a")
            .update(2, "b")
            .build();

        assert_eq!(
            request.payload(),
            &Payload::Updates(vec![(1, "a"), (2, "b")])
        );
    }

    #[test]
    fn path_keys_flow_into_uri() {
        let request = GetRequestBuilder::<i64, ()>::new("widgets/{widgetId}/orders", spec())
            .path_key("widgetId", 7i64)
            .id(3)
            .build();

        assert_eq!(request.uri(), "widgets/7/orders");
    }
}
