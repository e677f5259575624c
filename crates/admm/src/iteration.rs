//! The three-step splitting recurrence and its stopping-criterion algebra.
//!
//! Each function mutates one block of the shared [`IterationState`] and
//! assumes validated inputs (matching dimensions, rho > 0, alpha in (0, 2),
//! ordered bounds). The driver sequences them strictly as
//! RHS -> linear solve -> x-update -> projection -> dual update ->
//! residual check -> info record, once per outer iteration.

use splitqp_core::info::SolveInfo;
use splitqp_core::math::{clamp, dot, norm2, norm2_diff, RealNumber};
use splitqp_core::problem::ProblemData;
use splitqp_core::settings::Settings;
use splitqp_core::state::IterationState;

/// Build the right-hand side for the linear-system solve, in place in `x`.
/// The primal block gets rho (z - u) - q, the slack block z - u.
pub fn compute_rhs<T: RealNumber>(
    state: &mut IterationState<T>,
    data: &ProblemData<T>,
    settings: &Settings<T>,
) {
    let n = state.nvars();
    for i in 0..n {
        state.x[i] = settings.rho * (state.z[i] - state.u[i]) - data.q[i];
    }
    for i in n..state.dim() {
        state.x[i] = state.z[i] - state.u[i];
    }
}

/// Rescale the slack block of the solved vector. The linear system solves
/// for a rho-scaled dual in the slack slots; this recovers the unscaled
/// slack value the projection needs.
pub fn update_x<T: RealNumber>(state: &mut IterationState<T>, settings: &Settings<T>) {
    let inv_rho = settings.rho.recip();
    for i in state.nvars()..state.dim() {
        state.x[i] = inv_rho * state.x[i] + state.z[i] - state.u[i];
    }
}

/// Second splitting step: clamp the over-relaxed combination of x, z_prev
/// and u onto the box, overwriting `z`.
///
/// The caller must have snapshotted z into z_prev first; reading a stale
/// z_prev silently corrupts the recurrence.
pub fn project<T: RealNumber>(
    state: &mut IterationState<T>,
    data: &ProblemData<T>,
    settings: &Settings<T>,
) {
    let n = state.nvars();
    let one = T::one();
    for i in 0..n {
        let value = settings.alpha * state.x[i]
            + (one - settings.alpha) * state.z_prev[i]
            + state.u[i];
        state.z[i] = clamp(value, data.lx[i], data.ux[i]);
    }
    for i in n..state.dim() {
        let value = settings.alpha * state.x[i]
            + (one - settings.alpha) * state.z_prev[i]
            + state.u[i];
        state.z[i] = clamp(value, data.la[i - n], data.ua[i - n]);
    }
}

/// Third splitting step: ascend the scaled dual by the over-relaxed primal
/// residual, over all n + m entries. Accumulates into `u`, no clamping.
pub fn update_dual<T: RealNumber>(state: &mut IterationState<T>, settings: &Settings<T>) {
    let one = T::one();
    for i in 0..state.dim() {
        state.u[i] += settings.alpha * state.x[i]
            + (one - settings.alpha) * state.z_prev[i]
            - state.z[i];
    }
}

/// (1/2) pᵀ P p + qᵀ p at an arbitrary length-n point.
pub fn objective_value<T: RealNumber>(data: &ProblemData<T>, point: &[T]) -> T {
    data.p.quad_form(point) + dot(&data.q, point)
}

/// Euclidean norm of x - z over the primal block.
pub fn primal_residual<T: RealNumber>(state: &IterationState<T>) -> T {
    norm2_diff(state.primal(&state.x), state.primal(&state.z))
}

/// Euclidean norm of rho (z - z_prev), restricted to the primal block.
/// The slack block is deliberately left out; see the dual-residual tests.
pub fn dual_residual<T: RealNumber>(state: &IterationState<T>, rho: T) -> T {
    let mut norm_sq = T::zero();
    for i in 0..state.nvars() {
        let temp = rho * (state.z[i] - state.z_prev[i]);
        norm_sq += temp * temp;
    }
    norm_sq.sqrt()
}

/// Compare the recorded residual norms against the adaptive tolerances
///
///   eps_pri = sqrt(n+m) eps_abs + eps_rel max(|x|, |z|)
///   eps_dua = sqrt(n+m) eps_abs + eps_rel rho |u|
///
/// with all norms over the full n + m range. Convergence is strict on both
/// residuals; termination itself is the driver's call.
pub fn residuals_check<T: RealNumber>(
    info: &SolveInfo<T>,
    state: &IterationState<T>,
    settings: &Settings<T>,
) -> bool {
    let sqrt_dim = T::from_usize(state.dim()).unwrap().sqrt();
    let eps_pri =
        sqrt_dim * settings.eps_abs + settings.eps_rel * norm2(&state.x).max(norm2(&state.z));
    let eps_dua =
        sqrt_dim * settings.eps_abs + settings.eps_rel * settings.rho * norm2(&state.u);
    info.primal_residual < eps_pri && info.dual_residual < eps_dua
}

/// Snapshot the iteration number, the objective at the projected primal
/// block, and both residual norms into the reporting record.
pub fn update_info<T: RealNumber>(
    info: &mut SolveInfo<T>,
    iter: usize,
    data: &ProblemData<T>,
    state: &IterationState<T>,
    settings: &Settings<T>,
) {
    info.iterations = iter;
    info.objective = objective_value(data, state.primal(&state.z));
    info.primal_residual = primal_residual(state);
    info.dual_residual = dual_residual(state, settings.rho);
}
