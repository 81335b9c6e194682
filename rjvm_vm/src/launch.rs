//! The launch driver: boots a JVM and calls `main`.
//!
//! Composes "preinitialize core classes → init threads → init system class
//! → initialize target class → look up main → invoke" as a sequence of
//! `crate::executor::run_until_finished` scopes, one per step, so a
//! failure at any step can stop the sequence without unwinding the whole
//! boot.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::executor::run_until_finished;
use crate::thread::{Thread, Vm};
use crate::value::Value;

/// The boot-sequence operations a concrete runtime must provide:
/// `preinitialize_core_classes`, `init_threads`, `init_system_class`,
/// plus the system-initialized flag and command-line-argument publishing
/// the boot sequence needs.
///
/// Kept as its own trait, separate from `Vm`, so the `Vm` implementations
/// already exercised by `dispatch`/`trap_table`/`reflect`'s tests don't
/// have to grow boot-sequence stubs they never call.
#[async_trait(?Send)]
pub trait LaunchContext: Vm {
    /// Preinitialize the JVM's own core classes. Failure is fatal: `launch`
    /// wraps it in `Error::BootstrapFatal` and the process is expected to
    /// terminate.
    async fn preinitialize_core_classes(&self, thread: &dyn Thread) -> Result<()>;

    /// Initialize the thread subsystem. Returning `false` means
    /// initialization failed and the failure has already been surfaced to
    /// `thread`; `launch` stops silently rather than erroring.
    async fn init_threads(&self, thread: &dyn Thread) -> bool;

    /// Initialize `java.lang.System`. Same silent-stop convention as
    /// `init_threads`.
    async fn init_system_class(&self, thread: &dyn Thread) -> bool;

    /// Whether `init_system_class` has already run and succeeded, so
    /// `launch` can skip it on a second call.
    fn is_system_initialized(&self) -> bool;

    /// Publish `cmdline_args` into the runtime.
    fn publish_cmdline_args(&self, args: &[String]);
}

/// Run the full boot sequence for `class_name`'s `main`.
///
/// Returns `Ok(true)` if `main` was found and invoked, `Ok(false)` if a
/// non-fatal step stopped the sequence early (a thread/system-class
/// initialization failure, or no `main([Ljava/lang/String;)V` on the
/// target class — both already surfaced to `thread` by the step that
/// detected them).
///
/// # Errors
///
/// `Error::BootstrapFatal` if step 1 fails. Any error `resolve`/
/// `initialize_class` surfaces while loading the target class (step 4)
/// propagates as-is.
#[tracing::instrument(level = "info", skip(vm, thread, cmdline_args))]
pub async fn launch(
    vm: &dyn LaunchContext,
    thread: &dyn Thread,
    class_name: &str,
    cmdline_args: &[String],
) -> Result<bool> {
    run_until_finished(vm.preinitialize_core_classes(thread))
        .await
        .map_err(|error| Error::BootstrapFatal(error.to_string()))?;

    if !run_until_finished(vm.init_threads(thread)).await {
        tracing::warn!("init_threads failed; stopping launch silently");
        return Ok(false);
    }

    if !vm.is_system_initialized() && !run_until_finished(vm.init_system_class(thread)).await {
        tracing::warn!("init_system_class failed; stopping launch silently");
        return Ok(false);
    }

    let descriptor = format!("L{class_name};");
    let class = run_until_finished(vm.initialize_class(thread, &descriptor)).await?;

    vm.publish_cmdline_args(cmdline_args);

    let Some(main) = class.method_by_name_and_descriptor("main", "([Ljava/lang/String;)V") else {
        tracing::warn!(class_name, "no main([Ljava/lang/String;)V found");
        return Ok(false);
    };

    // Building the `String[]` heap argument array is the heap's job, out of
    // scope here; `cmdline_args` is already published via
    // `publish_cmdline_args` above, so `main` is invoked with a placeholder
    // receiver slot rather than a constructed array.
    run_until_finished(thread.invoke(main, vec![Value::Object(None)])).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::java_error::JavaError;
    use crate::mirror::ClassMirror;
    use crate::native_registry::IntrinsicMethod;
    use crate::testing::mock_class;
    use rjvm_classloader::{Class, ClassLoader, Method};
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::sync::Arc;

    struct FakeLaunchVm {
        classes: HashMap<String, Arc<Class>>,
        preinit_fails: bool,
        init_threads_ok: bool,
        init_system_class_ok: bool,
        system_initialized: Cell<bool>,
        published_args: RefCell<Vec<String>>,
    }

    impl FakeLaunchVm {
        fn ready(class: Arc<Class>) -> Self {
            let mut classes = HashMap::new();
            classes.insert(format!("L{};", class.name()), class);
            Self {
                classes,
                preinit_fails: false,
                init_threads_ok: true,
                init_system_class_ok: true,
                system_initialized: Cell::new(true),
                published_args: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl Vm for FakeLaunchVm {
        async fn resolve_class(&self, _thread: &dyn Thread, descriptor: &str) -> Result<Arc<Class>> {
            self.classes
                .get(descriptor)
                .cloned()
                .ok_or_else(|| Error::JavaError(JavaError::ClassNotFoundException(descriptor.to_string())))
        }
        async fn resolve_classes(&self, _thread: &dyn Thread, _descriptors: &[String]) -> Result<HashMap<String, Arc<Class>>> {
            unimplemented!()
        }
        fn get_initialized_class(&self, descriptor: &str) -> Option<Arc<Class>> {
            self.classes.get(descriptor).cloned()
        }
        async fn initialize_class(&self, _thread: &dyn Thread, descriptor: &str) -> Result<Arc<Class>> {
            self.classes
                .get(descriptor)
                .cloned()
                .ok_or_else(|| Error::JavaError(JavaError::ClassNotFoundException(descriptor.to_string())))
        }
        fn intern_string(&self, value: &str) -> Arc<str> {
            Arc::from(value)
        }
        fn get_native(&self, _class: &str, _name: &str) -> Option<IntrinsicMethod> {
            None
        }
        fn get_byte(&self, _address: u64) -> Result<u8> {
            unimplemented!()
        }
        fn bootstrap_class_loader(&self) -> Arc<ClassLoader> {
            unimplemented!()
        }
        fn class_mirror(&self, _descriptor: &str) -> Option<Arc<ClassMirror>> {
            None
        }
    }

    #[async_trait(?Send)]
    impl LaunchContext for FakeLaunchVm {
        async fn preinitialize_core_classes(&self, _thread: &dyn Thread) -> Result<()> {
            if self.preinit_fails {
                Err(Error::JavaError(JavaError::ClassNotFoundException("core".to_string())))
            } else {
                Ok(())
            }
        }
        async fn init_threads(&self, _thread: &dyn Thread) -> bool {
            self.init_threads_ok
        }
        async fn init_system_class(&self, _thread: &dyn Thread) -> bool {
            self.init_system_class_ok
        }
        fn is_system_initialized(&self) -> bool {
            self.system_initialized.get()
        }
        fn publish_cmdline_args(&self, args: &[String]) {
            *self.published_args.borrow_mut() = args.to_vec();
        }
    }

    struct FakeThread {
        vm: Arc<dyn Vm>,
        invoked: RefCell<Option<String>>,
    }

    #[async_trait(?Send)]
    impl Thread for FakeThread {
        fn id(&self) -> u64 {
            1
        }
        fn vm(&self) -> Arc<dyn Vm> {
            Arc::clone(&self.vm)
        }
        fn throw(&self, _error: JavaError) {}
        async fn invoke(&self, method: &Arc<Method>, _args: Vec<Value>) -> Result<Option<Value>> {
            *self.invoked.borrow_mut() = Some(method.full_signature());
            Ok(None)
        }
    }

    fn class_with_main(name: &str) -> Arc<Class> {
        use rjvm_classfile::{ClassAccessFlags, ClassFile, ConstantPool, MethodAccessFlags, MethodInfo};
        let mut pool = ConstantPool::new();
        let this_index = pool.add_class(name).expect("add_class");
        let name_index = pool.add_utf8("main").expect("add_utf8");
        let descriptor_index = pool.add_utf8("([Ljava/lang/String;)V").expect("add_utf8");
        let class_file = ClassFile {
            minor_version: 0,
            major_version: 61,
            constant_pool: pool,
            access_flags: ClassAccessFlags::PUBLIC,
            this_class: this_index,
            super_class: 0,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: vec![MethodInfo {
                access_flags: MethodAccessFlags::PUBLIC | MethodAccessFlags::STATIC,
                name_index,
                descriptor_index,
                attributes: Vec::new(),
            }],
            attributes: Vec::new(),
        };
        Arc::new(Class::new(std::sync::Weak::<ClassLoader>::new(), Arc::new(class_file)).expect("Class::new"))
    }

    #[tokio::test]
    async fn test_launch_runs_main() -> Result<()> {
        let class = class_with_main("com/example/Main");
        let fake_vm = Arc::new(FakeLaunchVm::ready(class));
        let vm: Arc<dyn LaunchContext> = Arc::clone(&fake_vm) as Arc<dyn LaunchContext>;
        let thread = FakeThread {
            vm: Arc::clone(&fake_vm) as Arc<dyn Vm>,
            invoked: RefCell::new(None),
        };

        let args = vec!["hello".to_string()];
        let ran = launch(vm.as_ref(), &thread, "com/example/Main", &args).await?;
        assert!(ran);
        assert_eq!(thread.invoked.borrow().as_deref(), Some("com/example/Main::main([Ljava/lang/String;)V"));
        assert_eq!(fake_vm.published_args.borrow().as_slice(), ["hello".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_launch_stops_silently_when_init_threads_fails() -> Result<()> {
        let class = class_with_main("com/example/Main");
        let mut fake_vm = FakeLaunchVm::ready(class);
        fake_vm.init_threads_ok = false;
        let fake_vm = Arc::new(fake_vm);
        let vm: Arc<dyn LaunchContext> = Arc::clone(&fake_vm) as Arc<dyn LaunchContext>;
        let thread = FakeThread {
            vm: Arc::clone(&fake_vm) as Arc<dyn Vm>,
            invoked: RefCell::new(None),
        };

        let ran = launch(vm.as_ref(), &thread, "com/example/Main", &[]).await?;
        assert!(!ran);
        assert!(thread.invoked.borrow().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_launch_propagates_bootstrap_fatal() {
        let class = class_with_main("com/example/Main");
        let mut fake_vm = FakeLaunchVm::ready(class);
        fake_vm.preinit_fails = true;
        let fake_vm = Arc::new(fake_vm);
        let vm: Arc<dyn LaunchContext> = Arc::clone(&fake_vm) as Arc<dyn LaunchContext>;
        let thread = FakeThread {
            vm: Arc::clone(&fake_vm) as Arc<dyn Vm>,
            invoked: RefCell::new(None),
        };

        let result = launch(vm.as_ref(), &thread, "com/example/Main", &[]).await;
        assert!(matches!(result, Err(Error::BootstrapFatal(_))));
    }

    #[tokio::test]
    async fn test_launch_no_main_method_returns_false() -> Result<()> {
        let class = mock_class("com/example/NoMain");
        let fake_vm = Arc::new(FakeLaunchVm::ready(class));
        let vm: Arc<dyn LaunchContext> = Arc::clone(&fake_vm) as Arc<dyn LaunchContext>;
        let thread = FakeThread {
            vm: Arc::clone(&fake_vm) as Arc<dyn Vm>,
            invoked: RefCell::new(None),
        };

        let ran = launch(vm.as_ref(), &thread, "com/example/NoMain", &[]).await?;
        assert!(!ran);
        Ok(())
    }
}
