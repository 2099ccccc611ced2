// Every LOG macro takes an optional key/value list: LOGALERT!(kvl: &list,"message {}",x)
#[doc(hidden)]
#[macro_export]
macro_rules! __LOGWITH {
    ($method:ident,kvl: $kvl:expr,$($arg:tt)+) => {{
        let lock = $crate::utils::statics::LOGGER.read().unwrap_or_else(|e| e.into_inner());
        lock.$method(format!($($arg)+),Some($kvl));
        drop(lock);
    }};
    ($method:ident,$($arg:tt)+) => {{
        let lock = $crate::utils::statics::LOGGER.read().unwrap_or_else(|e| e.into_inner());
        lock.$method(format!($($arg)+),None);
        drop(lock);
    }};
}
#[macro_export]
macro_rules! LOGTRACE {
    ($($arg:tt)+) => { $crate::__LOGWITH!(trace,$($arg)+) };
}
#[macro_export]
macro_rules! LOGDEBUG {
    ($($arg:tt)+) => { $crate::__LOGWITH!(debug,$($arg)+) };
}
#[macro_export]
macro_rules! LOGINFO {
    ($($arg:tt)+) => { $crate::__LOGWITH!(info,$($arg)+) };
}
#[macro_export]
macro_rules! LOGSUCCESS {
    ($($arg:tt)+) => { $crate::__LOGWITH!(success,$($arg)+) };
}
#[macro_export]
macro_rules! LOGNOTICE {
    ($($arg:tt)+) => { $crate::__LOGWITH!(notice,$($arg)+) };
}
#[macro_export]
macro_rules! LOGWARN {
    ($($arg:tt)+) => { $crate::__LOGWITH!(warn,$($arg)+) };
}
#[macro_export]
macro_rules! LOGALERT {
    ($($arg:tt)+) => { $crate::__LOGWITH!(alert,$($arg)+) };
}
#[macro_export]
macro_rules! LOGERROR {
    ($($arg:tt)+) => { $crate::__LOGWITH!(error,$($arg)+) };
}
#[macro_export]
macro_rules! LOGFATAL {
    ($($arg:tt)+) => { $crate::__LOGWITH!(fatal,$($arg)+) };
}
#[macro_export]
macro_rules! LOGRESULT {
    (clean: $clean:expr,kvl: $kvl:expr,$($arg:tt)+) => {{
        let lock = $crate::utils::statics::LOGGER.read().unwrap_or_else(|e| e.into_inner());
        lock.result(format!($($arg)+),Some($kvl),$clean);
        drop(lock);
    }};
    (clean: $clean:expr,$($arg:tt)+) => {{
        let lock = $crate::utils::statics::LOGGER.read().unwrap_or_else(|e| e.into_inner());
        lock.result(format!($($arg)+),None,$clean);
        drop(lock);
    }};
}
#[macro_export]
macro_rules! SETPROGRESS {
    ($length:expr) => {{
        let lock = $crate::utils::statics::LOGGER.read().unwrap_or_else(|e| e.into_inner());
        lock.set_progress($length);
        drop(lock);
    }};
}
#[macro_export]
macro_rules! INCPROGRESS {
    ($length:expr) => {{
        let lock = $crate::utils::statics::LOGGER.read().unwrap_or_else(|e| e.into_inner());
        lock.inc_progress($length);
        drop(lock);
    }};
}
#[macro_export]
macro_rules! DELETEPROGRESS {
    () => {{
        let lock = $crate::utils::statics::LOGGER.read().unwrap_or_else(|e| e.into_inner());
        lock.delete_progress();
        drop(lock);
    }};
}
