use crate::handler::{BodyHandler, GetHandler};
use crate::method::RouteMethod;
use std::collections::HashMap;

/// Exact path to handler mapping for a single method
pub(crate) struct RouteTable<H: ?Sized> {
    routes: HashMap<String, Box<H>>,
}

impl<H: ?Sized> RouteTable<H> {
    fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Stores `handler` under `key`, returns true when an existing entry was replaced
    pub(crate) fn insert(&mut self, key: String, handler: Box<H>) -> bool {
        self.routes.insert(key, handler).is_some()
    }

    pub(crate) fn get(&self, key: &str) -> Option<&H> {
        self.routes.get(key).map(|handler| handler.as_ref())
    }

    pub(crate) fn len(&self) -> usize {
        self.routes.len()
    }
}

/// A handler found for a request, tagged with the shape it is invoked with
pub(crate) enum Matched<'a> {
    Get(&'a dyn GetHandler),
    Body(&'a dyn BodyHandler),
}

/// One route table per [`RouteMethod`]
pub(crate) struct RouteTables {
    pub(crate) get: RouteTable<dyn GetHandler>,
    pub(crate) post: RouteTable<dyn BodyHandler>,
    pub(crate) put: RouteTable<dyn BodyHandler>,
    pub(crate) patch: RouteTable<dyn BodyHandler>,
    pub(crate) delete: RouteTable<dyn BodyHandler>,
}

impl RouteTables {
    pub(crate) fn new() -> Self {
        Self {
            get: RouteTable::new(),
            post: RouteTable::new(),
            put: RouteTable::new(),
            patch: RouteTable::new(),
            delete: RouteTable::new(),
        }
    }

    pub(crate) fn find(&self, method: RouteMethod, key: &str) -> Option<Matched<'_>> {
        match method {
            RouteMethod::Get => self.get.get(key).map(|handler| Matched::Get(handler)),
            RouteMethod::Post => self.post.get(key).map(|handler| Matched::Body(handler)),
            RouteMethod::Put => self.put.get(key).map(|handler| Matched::Body(handler)),
            RouteMethod::Patch => self.patch.get(key).map(|handler| Matched::Body(handler)),
            RouteMethod::Delete => self.delete.get(key).map(|handler| Matched::Body(handler)),
        }
    }

    pub(crate) fn len(&self, method: RouteMethod) -> usize {
        match method {
            RouteMethod::Get => self.get.len(),
            RouteMethod::Post => self.post.len(),
            RouteMethod::Put => self.put.len(),
            RouteMethod::Patch => self.patch.len(),
            RouteMethod::Delete => self.delete.len(),
        }
    }
}
