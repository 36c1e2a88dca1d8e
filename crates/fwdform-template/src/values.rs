use std::{
    borrow::{Borrow, Cow},
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
    marker::PhantomData,
};

/// A source of placeholder values.
///
/// Lookups are exact: keys are compared as-is, case-sensitively.
pub trait Values {
    fn get_value(&self, key: &str) -> Option<Cow<'_, str>>;
}

impl<T> Values for &T
where
    T: Values + ?Sized,
{
    fn get_value(&self, key: &str) -> Option<Cow<'_, str>> {
        T::get_value(self, key)
    }
}

/// Pairs are searched in order and the first matching key wins.
impl<K, V> Values for [(K, V)]
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn get_value(&self, key: &str) -> Option<Cow<'_, str>> {
        self.iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| Cow::Borrowed(v.as_ref()))
    }
}

impl<K, V, const N: usize> Values for [(K, V); N]
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn get_value(&self, key: &str) -> Option<Cow<'_, str>> {
        self.as_slice().get_value(key)
    }
}

impl<K, V> Values for Vec<(K, V)>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn get_value(&self, key: &str) -> Option<Cow<'_, str>> {
        self.as_slice().get_value(key)
    }
}

impl<K, V, S> Values for HashMap<K, V, S>
where
    K: Borrow<str> + Eq + Hash,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn get_value(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(|v| Cow::Borrowed(v.as_ref()))
    }
}

impl<K, V> Values for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn get_value(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(|v| Cow::Borrowed(v.as_ref()))
    }
}

/// Workaround to allow using functions as [`Values`].
///
/// As this isn't constructible you'll want to use [`vals()`] instead.
#[derive(Copy, Clone, Debug)]
pub struct ValuesFn<'s, F> {
    inner: F,
    marker: PhantomData<&'s ()>,
}

impl<'s, F> Values for ValuesFn<'s, F>
where
    F: Fn(&str) -> Option<Cow<'s, str>>,
{
    fn get_value(&self, key: &str) -> Option<Cow<'_, str>> {
        (self.inner)(key)
    }
}

/// Use a function as [`Values`].
///
/// ```
/// use fwdform_template::{vals, Template};
///
/// let template = Template::parse("%greeting%, %name%");
/// let values = vals(|key| match key {
///     "greeting" => Some("Hi".into()),
///     "name" => Some("there".into()),
///     _ => None,
/// });
/// assert_eq!(template.render(&values).unwrap(), "Hi, there");
/// ```
pub const fn vals<'s, F>(func: F) -> ValuesFn<'s, F>
where
    F: Fn(&str) -> Option<Cow<'s, str>>,
{
    ValuesFn {
        inner: func,
        marker: PhantomData,
    }
}
