use parking_lot::Mutex;

use crate::observable::{Observable, Subscription};

/// Accessor pair focusing one field `A` of an aggregate `S`.
pub struct Lens<S, A> {
    get: fn(&S) -> &A,
    get_mut: fn(&mut S) -> &mut A,
}

impl<S, A> Clone for Lens<S, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, A> Copy for Lens<S, A> {}

impl<S, A> Lens<S, A> {
    pub const fn new(get: fn(&S) -> &A, get_mut: fn(&mut S) -> &mut A) -> Self {
        Self { get, get_mut }
    }

    pub fn get<'a>(&self, source: &'a S) -> &'a A {
        (self.get)(source)
    }

    pub fn get_mut<'a>(&self, source: &'a mut S) -> &'a mut A {
        (self.get_mut)(source)
    }
}

/// Plain write rule: the written value replaces the field.
pub fn replace<A>(field: &mut A, update: A) {
    *field = update;
}

/// Derived cell reading and writing a single field of an aggregate cell.
///
/// Writes go through `apply`, which encodes the written `U` into the stored
/// field. Only the focused field is touched; the aggregate's version bumps and
/// its listeners fire as for any other write.
pub struct FieldCell<S, A, U = A> {
    source: Observable<S>,
    lens: Lens<S, A>,
    apply: fn(&mut A, U),
}

impl<S, A, U> Clone for FieldCell<S, A, U> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            lens: self.lens,
            apply: self.apply,
        }
    }
}

impl<S, A> FieldCell<S, A, A>
where
    S: Clone + Send + Sync + 'static,
    A: Clone,
{
    /// Field cell whose writes replace the field verbatim.
    pub fn pick(source: Observable<S>, lens: Lens<S, A>) -> Self {
        Self::new(source, lens, replace::<A>)
    }
}

impl<S, A, U> FieldCell<S, A, U>
where
    S: Clone + Send + Sync + 'static,
    A: Clone,
{
    pub fn new(source: Observable<S>, lens: Lens<S, A>, apply: fn(&mut A, U)) -> Self {
        Self {
            source,
            lens,
            apply,
        }
    }

    pub fn read(&self) -> A {
        let lens = self.lens;
        self.source.with(|s| lens.get(s).clone())
    }

    pub fn write(&self, update: U) {
        let lens = self.lens;
        let apply = self.apply;
        self.source.update(move |s| apply(lens.get_mut(s), update));
    }

    /// Aggregate this cell focuses into.
    pub fn source(&self) -> &Observable<S> {
        &self.source
    }

    /// Register `listener` for changes of this field only.
    ///
    /// Writes to sibling fields, or writes that store an equal value, do not
    /// call the listener.
    pub fn subscribe(&self, listener: impl Fn(&A) + Send + Sync + 'static) -> Subscription
    where
        A: PartialEq + Send + Sync + 'static,
    {
        let lens = self.lens;
        let last = Mutex::new(self.read());

        self.source.subscribe(move |s| {
            let current = lens.get(s);
            let changed = {
                let mut last = last.lock();
                if *last == *current {
                    false
                } else {
                    *last = current.clone();
                    true
                }
            };
            if changed {
                listener(current);
            }
        })
    }
}
