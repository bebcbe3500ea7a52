use super::{SettingsId, SettingsPool};
use crate::variable::VarEnv;

/// Guard that keeps a settings list pushed onto an environment.
///
/// Created by [`Session::scope_settings`](crate::session::Session::scope_settings);
/// the list is popped again when the guard is dropped, so the environment is
/// back to its previous state on every exit path.
pub struct SettingsScope<'a, E: VarEnv + ?Sized> {
  pool: &'a mut SettingsPool,
  env: &'a mut E,
  head: Option<SettingsId>,
}

impl<'a, E: VarEnv + ?Sized> SettingsScope<'a, E> {
  pub(crate) fn enter(pool: &'a mut SettingsPool, env: &'a mut E, head: Option<SettingsId>) -> Self {
    pool.push(head, env);
    Self { pool, env, head }
  }

  /// The environment with the settings applied.
  pub fn env(&self) -> &E {
    &*self.env
  }
}

impl<E: VarEnv + ?Sized> Drop for SettingsScope<'_, E> {
  fn drop(&mut self) {
    self.pool.pop(self.head, self.env);
  }
}
