//! Named wrappers over `dispatch` shared by `Channel` and `Log`.

/// Expands to one `&mut self` method per output primitive, each forwarding to
/// the surrounding type's `dispatch(Operation, args)`.
macro_rules! operation_methods {
    () => {
        operation_methods! {
            assert => Assert,
            clear => Clear,
            count => Count,
            debug => Debug,
            dir => Dir,
            dirxml => Dirxml,
            error => Error,
            exception => Exception,
            group => Group,
            group_collapsed => GroupCollapsed,
            group_end => GroupEnd,
            info => Info,
            log => Log,
            profile => Profile,
            profile_end => ProfileEnd,
            table => Table,
            time => Time,
            time_end => TimeEnd,
            time_stamp => TimeStamp,
            trace => Trace,
            warn => Warn,
        }
    };
    ($($method:ident => $variant:ident),+ $(,)?) => {
        $(
            #[doc = concat!(
                "Dispatch a `", stringify!($variant), "` call with the given arguments."
            )]
            pub fn $method<I, V>(&mut self, args: I) -> &mut Self
            where
                I: IntoIterator<Item = V>,
                V: Into<::serde_json::Value>,
            {
                self.dispatch($crate::operation::Operation::$variant, args)
            }
        )+
    };
}
