//! One-time setup of every table the solver reads.

use faer::Mat;

use crate::basis::{BasisTable, LagrangeBasis};
use crate::config::{JacobianMethod, TimeStepping, WaveConfig};
use crate::error::{DgResult, QuadratureOrderWarning};
use crate::mesh::{Mesh1D, jacobian_analytical, jacobian_numerical};
use crate::operators::assemble_operator;
use crate::quadrature::{QuadratureRule, lgl_nodes, lobatto_weights};
use crate::solver::ElementField;

/// Discretization of a wave problem, built once from a [`WaveConfig`].
///
/// Every field is computed in [`WaveProblem::new`] and read-only afterwards,
/// so one problem can feed any number of runs.
#[derive(Clone, Debug)]
pub struct WaveProblem {
    /// Parameters this problem was built from
    pub config: WaveConfig,
    /// Periodic mesh
    pub mesh: Mesh1D,
    /// LGL nodes in [-1, 1]
    pub lgl_nodes: Vec<f64>,
    /// LGL quadrature weights
    pub lgl_weights: Vec<f64>,
    /// Lagrange basis on the LGL nodes
    pub basis: LagrangeBasis,
    /// Rule used to assemble A
    pub operator_rule: QuadratureRule,
    /// Rule used for the volume integral
    pub volume_rule: QuadratureRule,
    /// Basis values and slopes at the volume rule's points
    pub volume_table: BasisTable,
    /// dx/dξ shared by all elements
    pub jacobian: f64,
    /// Elemental operator A
    pub operator: Mat<f64>,
    /// Rules too coarse for their integrands
    pub warnings: Vec<QuadratureOrderWarning>,
    physical_nodes: Vec<f64>,
}

impl WaveProblem {
    /// Validate `config` and build the mesh, basis, quadrature rules and A.
    pub fn new(config: WaveConfig) -> DgResult<Self> {
        config.validate()?;

        let mesh = Mesh1D::uniform_periodic(config.x_left, config.x_right, config.n_elements)?;
        let lgl = lgl_nodes(config.n_lgl)?;
        let lgl_weights = lobatto_weights(config.n_lgl, &lgl);
        let basis = LagrangeBasis::new(&lgl)?;

        let op_spec = config.operator_quadrature;
        let vol_spec = config.volume_quadrature;
        let operator_rule = QuadratureRule::new(op_spec.scheme, op_spec.points)?;
        let volume_rule = QuadratureRule::new(vol_spec.scheme, vol_spec.points)?;

        // L_p L_i has degree 2(N-1); F(u) dL_p/dξ has degree (N-1) + (N-2)
        let degree = basis.degree();
        let warnings: Vec<QuadratureOrderWarning> = [
            operator_rule.check_degree(2 * degree, "operator A"),
            volume_rule.check_degree((2 * degree).saturating_sub(1), "volume integral"),
        ]
        .into_iter()
        .flatten()
        .collect();
        for warning in &warnings {
            log::warn!("Quadrature order too low, accuracy degraded: {}", warning);
        }

        let jacobian = match config.jacobian {
            JacobianMethod::Analytical => jacobian_analytical(mesh.element_nodes(0)),
            JacobianMethod::Numerical => {
                let x_nodes = mesh.element_nodes(0);
                let sum: f64 = lgl.iter().map(|&xi| jacobian_numerical(x_nodes, xi)).sum();
                sum / lgl.len() as f64
            }
        };

        let operator = assemble_operator(&basis, &operator_rule, jacobian);
        let volume_table = BasisTable::new(&basis, &volume_rule);
        let physical_nodes = mesh.physical_nodes(&lgl);

        log::info!(
            "Set up DG problem: {} elements x {} LGL nodes on [{}, {}], c = {}, \
             c_lax = {}",
            config.n_elements,
            config.n_lgl,
            config.x_left,
            config.x_right,
            config.wave_speed,
            config.c_lax
        );

        Ok(Self {
            config,
            mesh,
            lgl_nodes: lgl,
            lgl_weights,
            basis,
            operator_rule,
            volume_rule,
            volume_table,
            jacobian,
            operator,
            warnings,
            physical_nodes,
        })
    }

    /// Nodes per element.
    pub fn n_nodes(&self) -> usize {
        self.config.n_lgl
    }

    /// Number of elements.
    pub fn n_elements(&self) -> usize {
        self.config.n_elements
    }

    /// Physical position of every node, layout x[e * n_nodes + p].
    pub fn physical_nodes(&self) -> &[f64] {
        &self.physical_nodes
    }

    /// Smallest physical distance between neighbouring nodes.
    pub fn min_node_spacing(&self) -> f64 {
        self.mesh.min_node_spacing(&self.lgl_nodes)
    }

    /// Time step from the stability heuristic for this mesh and config.
    pub fn stable_time_stepping(&self) -> DgResult<TimeStepping> {
        TimeStepping::from_stability_heuristic(
            self.min_node_spacing(),
            self.config.wave_speed,
            self.config.total_time,
        )
    }

    /// Sample an initial condition at the physical nodes.
    pub fn initial_field<F>(&self, f: F) -> ElementField
    where
        F: Fn(f64) -> f64,
    {
        ElementField::from_function(&self.mesh, &self.lgl_nodes, f)
    }
}
