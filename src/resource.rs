use std::any::Any;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[cfg(target_os = "android")]
use winit::platform::android::activity::AndroidApp;

/// Opaque, read-only handle to the platform's packaged asset store.
///
/// Cloning is cheap and every clone refers to the same store. The bridge
/// never looks inside; an engine that knows which platform it runs on can
/// recover the concrete store with [`ResourceBundleHandle::downcast_ref`].
#[derive(Clone)]
pub struct ResourceBundleHandle
{
        label: Arc<str>,
        store: Arc<dyn Any + Send + Sync>,
}

impl ResourceBundleHandle
{
        pub fn new<T>(
                label: impl Into<Arc<str>>,
                store: T,
        ) -> Self
        where
                T: Any + Send + Sync,
        {
                Self {
                        label: label.into(),
                        store: Arc::new(store),
                }
        }

        /// Short description of the store, for logs.
        pub fn label(&self) -> &str
        {
                &self.label
        }

        pub fn downcast_ref<T: Any>(&self) -> Option<&T>
        {
                self.store.downcast_ref::<T>()
        }

        /// Reads `name` from the store, whichever platform store it is.
        ///
        /// Fails with [`std::io::ErrorKind::Unsupported`] when the store is
        /// not one this crate knows how to read.
        pub fn read_asset(
                &self,
                name: &str,
        ) -> std::io::Result<Vec<u8>>
        {
                if let Some(assets) = self.downcast_ref::<AssetDirectory>()
                {
                        return assets.read(name);
                }

                #[cfg(target_os = "android")]
                if let Some(assets) = self.downcast_ref::<AndroidAssets>()
                {
                        return assets.read(name);
                }

                Err(std::io::Error::new(
                        std::io::ErrorKind::Unsupported,
                        format!("{} cannot be read as an asset store", self.label),
                ))
        }

        /// Whether both handles point at the same store.
        pub fn same_store(
                &self,
                other: &Self,
        ) -> bool
        {
                Arc::ptr_eq(&self.store, &other.store)
        }
}

impl fmt::Debug for ResourceBundleHandle
{
        fn fmt(
                &self,
                f: &mut fmt::Formatter<'_>,
        ) -> fmt::Result
        {
                f.debug_tuple("ResourceBundleHandle")
                        .field(&self.label)
                        .finish()
        }
}

/// Asset store backed by a directory, used on desktop targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDirectory
{
        root: PathBuf,
}

impl AssetDirectory
{
        pub fn new(root: impl Into<PathBuf>) -> Self
        {
                Self {
                        root: root.into(),
                }
        }

        pub fn root(&self) -> &Path
        {
                &self.root
        }

        pub fn path(
                &self,
                file_name: &str,
        ) -> PathBuf
        {
                self.root.join(file_name)
        }

        pub fn read(
                &self,
                file_name: &str,
        ) -> std::io::Result<Vec<u8>>
        {
                std::fs::read(self.path(file_name))
        }

        pub fn into_handle(self) -> ResourceBundleHandle
        {
                let label = format!("assets:{}", self.root.display());

                ResourceBundleHandle::new(label, self)
        }
}

/// Asset store on Android: the activity, whose asset manager reads the
/// APK's `assets/` folder.
#[cfg(target_os = "android")]
#[derive(Debug, Clone)]
pub struct AndroidAssets(pub AndroidApp);

#[cfg(target_os = "android")]
impl AndroidAssets
{
        pub fn read(
                &self,
                file_name: &str,
        ) -> std::io::Result<Vec<u8>>
        {
                use std::io::Read;

                let name = std::ffi::CString::new(file_name)
                        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

                let mut asset = self.0.asset_manager().open(&name).ok_or_else(|| {
                        std::io::Error::new(
                                std::io::ErrorKind::NotFound,
                                format!("{file_name} is not packaged in the APK"),
                        )
                })?;

                let mut bytes = Vec::new();

                asset.read_to_end(&mut bytes)?;

                Ok(bytes)
        }

        pub fn into_handle(self) -> ResourceBundleHandle
        {
                ResourceBundleHandle::new("android-assets", self)
        }
}

#[cfg(test)]
mod tests
{
        use super::*;

        #[test]
        fn clones_share_the_store()
        {
                let handle = AssetDirectory::new("assets").into_handle();
                let clone = handle.clone();

                assert!(handle.same_store(&clone));
                assert_eq!(clone.label(), "assets:assets");
        }

        #[test]
        fn separate_stores_are_distinct()
        {
                let a = ResourceBundleHandle::new("a", 1u32);
                let b = ResourceBundleHandle::new("b", 1u32);

                assert!(!a.same_store(&b));
        }

        #[test]
        fn downcast_recovers_the_concrete_store()
        {
                let handle = AssetDirectory::new("/data/app").into_handle();

                let dir = handle.downcast_ref::<AssetDirectory>().unwrap();

                assert_eq!(dir.path("palette.toml"), Path::new("/data/app/palette.toml"));
                assert!(handle.downcast_ref::<String>().is_none());
        }

        #[test]
        fn read_asset_goes_through_the_directory_store()
        {
                let dir = std::env::temp_dir().join(format!(
                        "surface-bridge-assets-{}",
                        std::process::id()
                ));
                std::fs::create_dir_all(&dir).unwrap();
                std::fs::write(dir.join("hello.txt"), b"hi").unwrap();

                let handle = AssetDirectory::new(&dir).into_handle();

                let found = handle.read_asset("hello.txt").unwrap();
                let missing = handle.read_asset("absent.txt").unwrap_err();

                std::fs::remove_dir_all(&dir).unwrap();

                assert_eq!(found, b"hi");
                assert_eq!(missing.kind(), std::io::ErrorKind::NotFound);
        }

        #[test]
        fn read_asset_rejects_unknown_stores()
        {
                let handle = ResourceBundleHandle::new("opaque", 7u64);

                let err = handle.read_asset("palette.toml").unwrap_err();

                assert_eq!(err.kind(), std::io::ErrorKind::Unsupported);
                assert!(err.to_string().contains("opaque"));
        }

        #[test]
        fn debug_shows_only_the_label()
        {
                let handle = ResourceBundleHandle::new("apk", vec![1u8, 2, 3]);

                assert_eq!(format!("{handle:?}"), "ResourceBundleHandle(\"apk\")");
        }
}
